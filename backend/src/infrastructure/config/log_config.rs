use serde::Deserialize;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
    #[default]
    Full,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRolling {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is not set. Accepts "info" or "citas_backend=trace".
    pub filter_level: String,
    pub with_ansi: bool,
    /// Log to stdout instead of the rolling file.
    pub stdout: bool,
    pub directory: String,
    pub file_name: String,
    pub rolling: LogRolling,
    pub format: LogFormat,
    pub with_level: bool,
    pub with_target: bool,
    pub with_thread_ids: bool,
    pub with_thread_names: bool,
    pub with_source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter_level: "info".into(),
            with_ansi: true,
            stdout: false,
            directory: "./logs".into(),
            file_name: "app.log".into(),
            rolling: LogRolling::default(),
            format: LogFormat::default(),
            with_level: true,
            with_target: true,
            with_thread_ids: true,
            with_thread_names: true,
            with_source_location: true,
        }
    }
}
