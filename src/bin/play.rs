//! CLI tool for rendering an RTTTL ringtone to a WAV file
//!
//! Usage: play <input.rtttl> [output.wav]
//!        play --text "<rtttl>" [output.wav]

use clap::Parser;
use rtttl::pipeline::renderer::{RenderConfig, Renderer};
use rtttl::pipeline::sequencer::{to_tone_sequence_with, total_duration_ms, SequencerConfig};
use rtttl::parse;
use std::fs;
use std::path::Path;
use std::process;

#[derive(Parser)]
#[command(name = "play")]
#[command(about = "Render an RTTTL ringtone to a WAV file", long_about = None)]
struct Cli {
    /// Path to an RTTTL file, or the RTTTL text itself with --text
    input: String,

    /// Output WAV file path (defaults to <input>.wav, or <name>.wav with --text)
    output: Option<String>,

    /// Treat INPUT as RTTTL text instead of a file path
    #[arg(short, long)]
    text: bool,

    /// Sample rate in Hz
    #[arg(short, long, default_value = "44100")]
    sample_rate: u32,

    /// Peak amplitude 0.0-1.0
    #[arg(short, long, default_value = "0.5")]
    amplitude: f32,

    /// Fade in/out of each tone in milliseconds
    #[arg(long, default_value = "5.0")]
    fade_ms: f32,

    /// Use the ringtone's default duration for notes without one
    #[arg(long)]
    inherit_duration: bool,
}

fn default_output(cli: &Cli, name: &str) -> String {
    if cli.text {
        let name = name.trim();
        let name = if name.is_empty() { "ringtone" } else { name };
        return format!("{}.wav", name);
    }

    let path = Path::new(&cli.input);
    path.with_extension("wav").to_string_lossy().into_owned()
}

fn main() {
    let cli = Cli::parse();

    let content = if cli.text {
        cli.input.clone()
    } else {
        match fs::read_to_string(&cli.input) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", cli.input, e);
                process::exit(1);
            }
        }
    };

    let ringtone = match parse(content.trim()) {
        Ok(ringtone) => ringtone,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli, &ringtone.name));

    println!("Parsed '{}' ({} notes)", ringtone.name, ringtone.notes.len());

    let sequencer_config = SequencerConfig {
        inherit_default_duration: cli.inherit_duration,
    };
    let events = to_tone_sequence_with(&ringtone, &sequencer_config);

    let config = RenderConfig {
        sample_rate: cli.sample_rate,
        amplitude: cli.amplitude,
        fade_ms: cli.fade_ms,
        ..Default::default()
    };

    println!("Configuration:");
    println!("  Sample rate: {} Hz", config.sample_rate);
    println!("  BPM: {}", ringtone.bpm);
    println!("  Amplitude: {:.2}", config.amplitude);
    println!("  Inherit duration: {}", sequencer_config.inherit_default_duration);
    println!();

    let mut renderer = match Renderer::new(config, events.clone()) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Render error: {}", e);
            if !cli.inherit_duration {
                eprintln!("  (notes without a duration need --inherit-duration)");
            }
            process::exit(1);
        }
    };

    println!(
        "Rendering {:.1}s of audio...",
        total_duration_ms(&events) / 1000.0
    );

    match renderer.generate_wav(&output_path) {
        Ok(_) => {
            println!("✓ Generated {}", output_path);
        }
        Err(e) => {
            eprintln!("Error writing WAV file: {}", e);
            process::exit(1);
        }
    }
}
