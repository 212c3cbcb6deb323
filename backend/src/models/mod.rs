use std::collections::BTreeMap;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use crate::application::domain::{Locale, Role};

/// Current session as seen by this service.
#[derive(Serialize, ToSchema, Debug)]
pub struct SessionUser {
    pub uid: String,
    /// `None` when the token carried no roles claim.
    pub roles: Option<Vec<Role>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct Page {
    pub locale: Locale,
    pub title: String,
    pub body: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct MessageCatalog {
    pub requested: String,
    pub locale: Locale,
    pub supported: Vec<Locale>,
    pub messages: BTreeMap<String, String>,
}

#[derive(Deserialize, ToSchema, Default, Debug)]
pub struct DevSessionInData {
    pub uid: String,
    pub roles: Option<Vec<Role>>,
}

#[derive(Serialize, Deserialize, ToSchema, Default, Debug)]
pub struct DevSessionOutData {
    pub token: String,
    pub exp: i64,
}
