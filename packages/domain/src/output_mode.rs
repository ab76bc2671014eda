//! Where synthesized audio goes.
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output destination for a streaming run.
///
/// Parses from the strings `play`, `stream` and `none`; anything else is
/// taken as a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// Render each utterance synchronously to an audio player.
    Play,
    /// The synthesizer already delivered audio incrementally; nothing to do.
    Stream,
    /// Discard audio, only durations are reported.
    None,
    /// Append each utterance to a WAV file created empty before the run.
    File(PathBuf),
}

impl OutputMode {
    /// Path of the output file, for [`OutputMode::File`].
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::File(p) => Some(p),
            _ => None,
        }
    }
}

impl FromStr for OutputMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => Self::Play,
            "stream" => Self::Stream,
            "none" => Self::None,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => f.write_str("play"),
            Self::Stream => f.write_str("stream"),
            Self::None => f.write_str("none"),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_paths() {
        assert_eq!("play".parse::<OutputMode>(), Ok(OutputMode::Play));
        assert_eq!("stream".parse::<OutputMode>(), Ok(OutputMode::Stream));
        assert_eq!("none".parse::<OutputMode>(), Ok(OutputMode::None));
        let file: OutputMode = "out/hello.wav".parse().unwrap_or(OutputMode::None);
        assert_eq!(file.path(), Some(&PathBuf::from("out/hello.wav")));
        assert_eq!(file.to_string(), "out/hello.wav");
    }

    #[test]
    fn serde_roundtrip_of_file_mode() {
        let mode = OutputMode::File(PathBuf::from("a.wav"));
        let json = serde_json::to_string(&mode).expect("serialize");
        let back: OutputMode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, mode);
    }
}
