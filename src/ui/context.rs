use crate::cli::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub watch: bool,
    pub color: bool,
}

impl UiContext {
    pub fn new(json: bool, watch: bool, cli_color: ColorWhen) -> Self {
        Self::from_caps(json, watch, cli_color, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        watch: bool,
        cli_color: ColorWhen,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = !json
            && match cli_color {
                ColorWhen::Never => false,
                ColorWhen::Always => true,
                ColorWhen::Auto => caps.supports_color && !caps.is_ci,
            };

        Self { json, watch, color }
    }
}
