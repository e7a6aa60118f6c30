use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the spoken-letter audio document.
    Audio {
        #[clap(long, default_value = "espeak")]
        tts_bin: String,

        #[clap(long, default_value = "audio.json")]
        out: String,

        #[clap(long, default_value_t = 30)]
        tool_timeout_secs: u64,
    },

    /// Generate the rendered-glyph font document.
    Glyphs {
        #[clap(long, default_value = "google-chrome")]
        browser_bin: String,

        #[clap(long, default_value = "convert")]
        trim_bin: String,

        #[clap(long, default_value = "template.html")]
        template: String,

        #[clap(long, default_value = "../src/fonts/font_default.json")]
        out: String,

        #[clap(long, default_value_t = 30)]
        tool_timeout_secs: u64,
    },
}
