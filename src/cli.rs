use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a bilingual SRT subtitle file from an audio recording
    Generate {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file (defaults to <stem>_<target>.srt next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source language code override
        #[arg(long)]
        source_lang: Option<String>,

        /// Target language code override
        #[arg(long)]
        target_lang: Option<String>,
    },

    /// Generate bilingual subtitles for every audio file in a directory
    Batch {
        /// Input directory containing audio files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output directory for subtitle files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Target language code override
        #[arg(long)]
        target_lang: Option<String>,
    },

    /// Transcribe audio to a monolingual SRT file without translation
    Transcribe {
        /// Input audio file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,

        /// Source language hint
        #[arg(short, long)]
        language: Option<String>,
    },
}
