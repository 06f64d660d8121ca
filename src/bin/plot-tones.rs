use clap::Parser;
use plotters::prelude::*;
use rtttl::pipeline::sequencer::{to_tone_sequence_with, total_duration_ms, SequencerConfig};
use rtttl::{parse, Ringtone, ToneEvent};

#[derive(Parser)]
#[command(name = "plot-tones")]
#[command(about = "Plot the pitch of an RTTTL ringtone over time as SVG", long_about = None)]
struct Args {
    /// Path to an RTTTL file, or the RTTTL text itself with --text
    input: String,

    /// Output SVG file path
    output_path: String,

    /// Treat INPUT as RTTTL text instead of a file path
    #[arg(short, long)]
    text: bool,

    /// Use the ringtone's default duration for notes without one
    #[arg(long)]
    inherit_duration: bool,
}

/// A tone or rest placed on the timeline
struct Segment {
    start_ms: f32,
    end_ms: f32,
    event: ToneEvent,
}

fn load_ringtone(args: &Args) -> Result<Ringtone, Box<dyn std::error::Error>> {
    let content = if args.text {
        args.input.clone()
    } else {
        std::fs::read_to_string(&args.input)?
    };
    Ok(parse(content.trim())?)
}

fn layout(events: &[ToneEvent]) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
    let mut segments = Vec::with_capacity(events.len());
    let mut time_ms = 0.0f32;

    for (i, event) in events.iter().enumerate() {
        if !event.duration_ms.is_finite() {
            return Err(format!(
                "Event {} has no playable duration, try --inherit-duration",
                i
            )
            .into());
        }
        let end_ms = time_ms + event.duration_ms as f32;
        segments.push(Segment {
            start_ms: time_ms,
            end_ms,
            event: *event,
        });
        time_ms = end_ms;
    }

    Ok(segments)
}

fn create_plot(
    args: &Args,
    ringtone: &Ringtone,
    segments: &[Segment],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(&args.output_path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_time = segments.last().map(|s| s.end_ms).unwrap_or(0.0).max(1.0);
    let max_freq = segments
        .iter()
        .map(|s| s.event.frequency_hz as f32)
        .fold(0.0f32, f32::max)
        .max(1.0)
        * 1.1;

    let title = format!(
        "{}: d={}, o={}, b={}",
        ringtone.name.trim(),
        ringtone.default_duration,
        ringtone.default_octave,
        ringtone.bpm
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f32..max_time, 0f32..max_freq)?;

    chart
        .configure_mesh()
        .x_desc("Time (ms)")
        .y_desc("Frequency (Hz)")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    for segment in segments {
        if segment.event.is_silence {
            // Rests as a red band on the time axis
            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (segment.start_ms, 0.0),
                    (segment.end_ms, max_freq * 0.02),
                ],
                RED.mix(0.4).filled(),
            )))?;
        } else {
            let freq = segment.event.frequency_hz as f32;
            chart.draw_series(LineSeries::new(
                [(segment.start_ms, freq), (segment.end_ms, freq)],
                BLUE.stroke_width(3),
            ))?;
            chart.draw_series(std::iter::once(Circle::new(
                (segment.start_ms, freq),
                2,
                BLACK.filled(),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let ringtone = load_ringtone(&args)?;
    let config = SequencerConfig {
        inherit_default_duration: args.inherit_duration,
    };
    let events = to_tone_sequence_with(&ringtone, &config);

    println!("Tone Plot Generator");
    println!("===================");
    println!("  Name: {}", ringtone.name.trim());
    println!("  Notes: {}", ringtone.notes.len());
    println!(
        "  Rests: {}",
        events.iter().filter(|e| e.is_silence).count()
    );

    let segments = layout(&events)?;
    println!("  Length: {:.1}ms", total_duration_ms(&events));

    print!("  Creating plot... ");
    create_plot(&args, &ringtone, &segments)?;
    println!("done");

    println!();
    println!("Output: {}", args.output_path);

    Ok(())
}
