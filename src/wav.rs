//! Raw PCM to WAV (RIFF/WAVE) container encoding.
//!
//! Speech APIs commonly return headerless little-endian PCM as a base64
//! string. Browsers and media players need a container around it, so this
//! module prepends the canonical 44-byte header and copies the samples
//! through untouched.
//!
//! ```text
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  36 + data length
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  16 (fmt chunk length)
//!     20     2  1 (PCM)
//!     22     2  channels
//!     24     4  sample rate
//!     28     4  byte rate
//!     32     2  block align
//!     34     2  bits per sample
//!     36     4  "data"
//!     40     4  data length
//!     44     n  PCM bytes
//! ```

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use derive_builder::Builder;

/// Length of the RIFF/WAVE header written in front of every payload.
pub const HEADER_LEN: usize = 44;

/// Media type of an encoded container.
pub const MIME_TYPE: &str = "audio/wav";

/// Sample rate emitted by the speech API (24 kHz).
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Channel count emitted by the speech API (mono).
pub const DEFAULT_CHANNELS: u16 = 1;

/// Sample width emitted by the speech API (16-bit signed).
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;

const FMT_CHUNK_LEN: u32 = 16;
const AUDIO_FORMAT_PCM: u16 = 1;

/// Bytes of the header counted by the RIFF chunk size (everything after offset 8).
const RIFF_HEADER_OVERHEAD: u32 = 36;

#[derive(thiserror::Error, Debug)]
pub enum WavError {
    #[error("Malformed audio data: {0}")]
    MalformedAudioData(#[from] base64::DecodeError),
    #[error("PCM payload of {0} bytes does not fit in a WAV container")]
    PayloadTooLarge(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read WAV data: {0}")]
    Read(#[from] hound::Error),
}

/// Sample layout described by the `fmt ` chunk.
///
/// `Default` matches what the speech API produces: 24 kHz, mono, 16-bit.
/// Use [`WavFormatBuilder`] for anything else; the builder rejects layouts
/// that cannot be expressed in the header fields.
///
/// ```rust
/// use voice_studio_rs::wav::WavFormatBuilder;
///
/// let format = WavFormatBuilder::default()
///     .sample_rate(16_000)
///     .build()?;
/// assert_eq!(format.byte_rate(), 32_000);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct WavFormat {
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
}

impl Default for WavFormat {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
        }
    }
}

impl WavFormatBuilder {
    fn validate(&self) -> Result<(), String> {
        let defaults = WavFormat::default();
        let sample_rate = self.sample_rate.unwrap_or(defaults.sample_rate);
        let channels = self.channels.unwrap_or(defaults.channels);
        let bits = self.bits_per_sample.unwrap_or(defaults.bits_per_sample);

        if sample_rate == 0 {
            return Err("sample rate must be non-zero".to_string());
        }
        if channels == 0 {
            return Err("channel count must be non-zero".to_string());
        }
        if bits == 0 || bits % 8 != 0 {
            return Err(format!(
                "bits per sample must be a non-zero multiple of 8, got {bits}"
            ));
        }

        let block_align = u32::from(channels) * u32::from(bits / 8);
        if block_align > u32::from(u16::MAX) {
            return Err(format!("block align {block_align} overflows the header field"));
        }
        if u64::from(sample_rate) * u64::from(block_align) > u64::from(u32::MAX) {
            return Err("byte rate overflows the header field".to_string());
        }
        Ok(())
    }
}

impl WavFormat {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Bytes per sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes of PCM per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

/// A complete WAV file held in memory: header followed by the PCM payload.
///
/// The buffer length is always `HEADER_LEN + pcm_data().len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContainer {
    bytes: Vec<u8>,
    format: WavFormat,
}

impl WavContainer {
    /// The full file, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: even an empty payload carries a header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn media_type(&self) -> &'static str {
        MIME_TYPE
    }

    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// The PCM payload after the header, exactly as it was decoded.
    pub fn pcm_data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    pub fn data_len(&self) -> usize {
        self.bytes.len() - HEADER_LEN
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.data_len() as f64 / self.format.byte_rate() as f64
    }

    /// Decode the payload as 16-bit samples through a standard WAV reader.
    ///
    /// Only meaningful for formats of 16 bits or fewer: 8-bit data comes back
    /// widened to `i16`, and 24/32-bit data fails with [`WavError::Read`].
    /// A payload that is not a whole number of samples (for example an odd
    /// byte count at 16 bits) is also rejected by the reader, even though
    /// [`wrap_pcm`] accepts it.
    pub fn samples(&self) -> Result<Vec<i16>, WavError> {
        let reader = hound::WavReader::new(Cursor::new(self.as_bytes()))?;
        let samples = reader.into_samples::<i16>().collect::<Result<Vec<_>, _>>()?;
        Ok(samples)
    }

    /// Write the file to disk.
    pub fn write_to(&self, path: &Path) -> Result<(), WavError> {
        std::fs::write(path, &self.bytes)?;
        log::info!("Wrote {} bytes of WAV audio to {}", self.len(), path.display());
        Ok(())
    }
}

impl AsRef<[u8]> for WavContainer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Decode base64 PCM (24 kHz, mono, 16-bit) and wrap it in a WAV container.
///
/// The empty string is valid input and yields a 44-byte file with no samples.
/// Input that is not standard, padded base64 fails with
/// [`WavError::MalformedAudioData`]; nothing is truncated or skipped.
pub fn encode_pcm_to_wav(base64_audio: &str) -> Result<WavContainer, WavError> {
    encode_pcm_to_wav_with_format(base64_audio, &WavFormat::default())
}

/// Same as [`encode_pcm_to_wav`] with an explicit sample layout.
pub fn encode_pcm_to_wav_with_format(
    base64_audio: &str,
    format: &WavFormat,
) -> Result<WavContainer, WavError> {
    let pcm = STANDARD.decode(base64_audio)?;
    log::debug!(
        "Decoded {} PCM bytes from {} base64 characters",
        pcm.len(),
        base64_audio.len()
    );
    wrap_pcm(&pcm, format)
}

/// Wrap raw PCM bytes in a WAV container without re-encoding them.
pub fn wrap_pcm(pcm: &[u8], format: &WavFormat) -> Result<WavContainer, WavError> {
    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|&n| n <= u32::MAX - RIFF_HEADER_OVERHEAD)
        .ok_or(WavError::PayloadTooLarge(pcm.len()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + pcm.len());
    write_header(&mut bytes, data_len, format);
    debug_assert_eq!(bytes.len(), HEADER_LEN);
    bytes.extend_from_slice(pcm);

    Ok(WavContainer {
        bytes,
        format: *format,
    })
}

fn write_header(out: &mut Vec<u8>, data_len: u32, format: &WavFormat) {
    // RIFF chunk
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(RIFF_HEADER_OVERHEAD + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt subchunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&AUDIO_FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&format.channels().to_le_bytes());
    out.extend_from_slice(&format.sample_rate().to_le_bytes());
    out.extend_from_slice(&format.byte_rate().to_le_bytes());
    out.extend_from_slice(&format.block_align().to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample().to_le_bytes());

    // data subchunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
}
