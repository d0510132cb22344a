use wp_types::{Wave, WaveCard};

pub const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

/// One card per wave, in list order. No sorting.
pub fn render_waves(waves: &[Wave]) -> Vec<WaveCard> {
    waves.iter().map(render_wave).collect()
}

pub fn render_wave(wave: &Wave) -> WaveCard {
    WaveCard {
        address: wave.address.to_string(),
        time: wave.time().format(TIME_FORMAT).to_string(),
        message: wave.message.clone(),
    }
}
