//! Pluggable behaviour of a voice.
//!
//! Each strategy is a trait with a blanket impl for the matching closure, so
//! simple voices can be put together inline:
//!
//! ```
//! use fluent_flite::strategy::Synthesizer;
//! use fluent_flite_domain::{SynthOutcome, Utterance, Wave};
//!
//! let mut silence = |utt: &mut Utterance| {
//!     SynthOutcome::ok(Wave::mono(16_000, vec![0; 160 * utt.len()]))
//! };
//! let mut utt = Utterance::new();
//! utt.push(fluent_flite_domain::Token::new("hi"));
//! assert!(silence.synthesize(&mut utt).is_completed());
//! ```

use fluent_flite_domain::{SynthOutcome, Token, Utterance, Wave};

use crate::error::Result;
use crate::tokens::TokenStream;

/// Turns one chunk of tokens into audio.
///
/// Implementations may run text analysis, consult letter-to-sound rules and
/// read unit data; the driver only sees the outcome. Returning
/// [`SynthOutcome::Interrupted`] stops the whole run.
pub trait Synthesizer: Send {
    fn synthesize(&mut self, utt: &mut Utterance) -> SynthOutcome;
}

impl<F> Synthesizer for F
where
    F: FnMut(&mut Utterance) -> SynthOutcome + Send,
{
    fn synthesize(&mut self, utt: &mut Utterance) -> SynthOutcome {
        self(utt)
    }
}

/// Decides whether `token` starts a new utterance after the chunk so far.
///
/// Only consulted while the chunk is non-empty.
pub trait UttBreak: Send {
    fn should_break(&mut self, tokens: &dyn TokenStream, token: &Token, utt: &Utterance) -> bool;
}

impl<F> UttBreak for F
where
    F: FnMut(&dyn TokenStream, &Token, &Utterance) -> bool + Send,
{
    fn should_break(&mut self, tokens: &dyn TokenStream, token: &Token, utt: &Utterance) -> bool {
        self(tokens, token, utt)
    }
}

/// Last look at a closed chunk before synthesis. `None` drops the chunk.
pub trait UttPreprocess: Send {
    fn preprocess(&mut self, utt: Utterance) -> Option<Utterance>;
}

impl<F> UttPreprocess for F
where
    F: FnMut(Utterance) -> Option<Utterance> + Send,
{
    fn preprocess(&mut self, utt: Utterance) -> Option<Utterance> {
        self(utt)
    }
}

/// Renders a wave synchronously for [`OutputMode::Play`](fluent_flite_domain::OutputMode::Play).
pub trait AudioPlayer: Send {
    fn play(&mut self, wave: &Wave) -> Result<()>;
}

impl<F> AudioPlayer for F
where
    F: FnMut(&Wave) -> Result<()> + Send,
{
    fn play(&mut self, wave: &Wave) -> Result<()> {
        self(wave)
    }
}

/// flite's sentence-end heuristic.
///
/// Breaks before `token` when
/// * the whitespace before it holds at least two newlines,
/// * the previous token ended with `:`, `?` or `!`,
/// * the previous token ended with `.`, more than one whitespace character
///   follows, and `token` is capitalised,
/// * the previous token ended with `.`, `token` is capitalised, and the
///   previous token does not look like an abbreviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUttBreak;

impl UttBreak for DefaultUttBreak {
    fn should_break(&mut self, _tokens: &dyn TokenStream, token: &Token, utt: &Utterance) -> bool {
        let Some(prev) = utt.last() else {
            return false;
        };
        let post = prev.punctuation.as_str();
        let full_stop = post.contains('.');
        let capitalised = starts_upper(&token.name);

        if token.whitespace.matches('\n').count() >= 2 {
            true
        } else if post.contains([':', '?', '!']) {
            true
        } else if full_stop && token.whitespace.len() > 1 && capitalised {
            true
        } else {
            full_stop && capitalised && !looks_like_abbreviation(&prev.name)
        }
    }
}

fn starts_upper(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_uppercase())
}

/// `USA.` or `Dr.`: ends in a capital, or is a short capitalised word.
fn looks_like_abbreviation(name: &str) -> bool {
    name.ends_with(|c: char| c.is_ascii_uppercase())
        || (name.chars().count() < 4 && starts_upper(name))
}
