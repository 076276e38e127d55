//! Audio backends.
//!
//! A terminal has exactly one sound: the bell.  `BellAudio` rings it for the
//! one-shot cue channel and leaves the busy projectile/target channels quiet.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::backend::{AudioBackend, Channel, Sound};

const BEL: &[u8] = b"\x07";

pub struct BellAudio<W: Write> {
    out: W,
    enabled: bool,
    /// Last sound started on each channel; a new one replaces it.
    playing: HashMap<Channel, Sound>,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            playing: HashMap::new(),
        }
    }

    pub fn playing(&self, channel: Channel) -> Option<Sound> {
        self.playing.get(&channel).copied()
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(BEL)?;
        self.out.flush()
    }
}

impl BellAudio<io::Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> AudioBackend for BellAudio<W> {
    fn is_available(&self) -> bool {
        self.enabled
    }

    fn play(&mut self, channel: Channel, sound: Sound) {
        if !self.enabled {
            return;
        }
        log::trace!("Sound {:?} on {:?}", sound, channel);
        self.playing.insert(channel, sound);
        if channel == Channel::Other {
            if let Err(err) = self.ring() {
                log::debug!("Bell failed: {}", err);
            }
        }
    }

    fn stop_all(&mut self) {
        self.playing.clear();
    }
}

/// Drops every request.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn is_available(&self) -> bool {
        false
    }

    fn play(&mut self, _channel: Channel, _sound: Sound) {}

    fn stop_all(&mut self) {}
}
