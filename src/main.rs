use rtttl::pipeline::renderer::{RenderConfig, Renderer};
use rtttl::pipeline::sequencer::total_duration_ms;
use rtttl::{parse, to_tone_sequence, ParseError, Ringtone};

const KNIGHT_RIDER: &str = "KnightRi:d=4,o=5,b=63:16e6, 32f6, 32e6, 8b6, 16e7, 32f7, 32e7, 8b6, 16e6, 32f6, 32e6, 16b6, 16e7, 4d7, 8p, 4p, 16e6, 32f6, 32e6, 8b6, 16e7, 32f7, 32e7, 8b6, 16e6, 32f6, 32e6, 16b6, 16e7, 4f7, 4p";

fn demo_parse() -> Result<Ringtone, ParseError> {
    println!("\n=== Parser Demo ===\n");

    let ringtone = parse(KNIGHT_RIDER)?;

    println!("Ringtone: {}", ringtone.name);
    println!("  Default duration: {}", ringtone.default_duration);
    println!("  Default octave: {}", ringtone.default_octave);
    println!("  BPM: {}", ringtone.bpm);
    println!("  Notes: {}", ringtone.notes.len());

    Ok(ringtone)
}

fn demo_sequence(ringtone: &Ringtone) {
    println!("\n=== Sequencer Demo ===\n");

    let events = to_tone_sequence(ringtone);

    println!(
        "{:<6} {:<8} {:<12} {:<12}",
        "Index", "Note", "Freq (Hz)", "Length (ms)"
    );
    println!("{}", "-".repeat(42));

    for (i, (note, event)) in ringtone.notes.iter().zip(events.iter()).enumerate() {
        let name = format!("{}{}{}", note.pitch, note.octave, if note.dotted { "." } else { "" });
        let freq = if event.is_silence {
            "-".to_string()
        } else {
            format!("{:.2}", event.frequency_hz)
        };
        println!(
            "{:<6} {:<8} {:<12} {:<12.1}",
            i, name, freq, event.duration_ms
        );
    }

    println!("\nTotal length: {:.1}ms", total_duration_ms(&events));

    let config = RenderConfig::default();
    match Renderer::new(config.clone(), events) {
        Ok(mut renderer) => {
            let samples = renderer.render();
            println!(
                "Rendered {} samples at {} Hz",
                samples.len(),
                config.sample_rate
            );
        }
        Err(e) => eprintln!("Render error: {}", e),
    }
}

fn main() {
    println!("RTTTL Ringtone Player");
    println!("=====================");

    match demo_parse() {
        Ok(ringtone) => demo_sequence(&ringtone),
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }

    println!("\n=====================");
    println!("Demo complete!");
}
