//! Configuration and CLI argument handling

use clap::Parser;

use crate::tasks::PresentationConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A Pomodoro countdown timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Base window title
    #[arg(long, default_value = "Pomodoro Timer")]
    pub title: String,

    /// Disable the audible completion alert
    #[arg(long)]
    pub no_sound: bool,

    /// Do not request desktop notification permission
    #[arg(long)]
    pub no_notifications: bool,

    /// Do not draw the countdown in the terminal
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn presentation(&self) -> PresentationConfig {
        PresentationConfig {
            title: self.title.clone(),
            sound: !self.no_sound,
            terminal: !self.quiet,
        }
    }
}
