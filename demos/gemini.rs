use std::path::Path;
use std::time::Instant;

use voice_studio_rs::{
    engines::gemini::{GeminiEngine, GeminiParams},
    i18n::Language,
    studio::{GenerationRequest, Studio},
    voices::{find_voice, VOICES},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let engine = GeminiEngine::new(GeminiParams::from_env())?;
    let mut studio = Studio::new(engine);

    let labels: Vec<String> = VOICES.iter().map(|v| v.label(Language::En)).collect();
    println!("Available voices: {:?}", labels);

    let text = "Hello! This is Sarwar Voice Studio. \
                The same voices can read English, Urdu, and Arabic text.";
    let voice = find_voice("Puck").ok_or("voice not in catalogue")?;
    let request = GenerationRequest::text_to_audio(text, voice);

    let synth_start = Instant::now();
    let audio = match studio.generate(&request) {
        Ok(audio) => audio,
        Err(e) => {
            eprintln!("{}", e.localized_message(Language::En));
            return Err(e.into());
        }
    };
    let synth_dur = synth_start.elapsed();

    println!(
        "Generated {:.2}s of audio in {:.2?} with voice {}",
        audio.wav.duration_secs(),
        synth_dur,
        audio.voice_id
    );

    audio.wav.write_to(Path::new(audio.filename()))?;
    println!("Saved to {} ({})", audio.filename(), audio.media_type());

    Ok(())
}
