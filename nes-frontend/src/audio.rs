use sdl2::audio::{AudioQueue, AudioSpecDesired};
use sdl2::Sdl;

pub const SAMPLE_RATE: i32 = 44_100;

/// Where a running game sends its sound. The director only holds on to it.
pub trait AudioSink {
    fn resume(&self);

    fn pause(&self);

    /// Drop anything queued but not yet played.
    fn clear(&self);
}

/// SDL2 queue based playback. The device starts paused; a game view resumes it
/// on enter and pauses it again on exit.
pub struct Audio {
    queue: AudioQueue<f32>,
}

impl Audio {
    pub fn new(sdl: &Sdl) -> Result<Audio, String> {
        let audio_subsystem = sdl.audio()?;
        let desired_spec = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: Some(512),
        };
        let queue = audio_subsystem.open_queue::<f32, _>(None, &desired_spec)?;
        log::debug!("Opened audio device: {:?}", queue.spec().freq);
        Ok(Audio { queue })
    }
}

impl AudioSink for Audio {
    fn resume(&self) {
        self.queue.resume();
    }

    fn pause(&self) {
        self.queue.pause();
    }

    fn clear(&self) {
        self.queue.clear();
    }
}
