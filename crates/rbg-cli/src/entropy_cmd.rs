//! Draw one entropy input string from the jitter source.

use rbg_crypto::entropy::{EntropyRequest, EntropySource, JitterConfig, JitterSource};

pub fn run(
    min_entropy: usize,
    min_len: usize,
    max_len: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = JitterSource::new(JitterConfig::default());
    let request = EntropyRequest::new(min_entropy, min_len, max_len, false);
    let input = source.get_entropy_input(request)?;

    eprintln!(
        "{} bytes, >= {} bits assessed min-entropy (rounds {})",
        input.len(),
        min_entropy,
        source.rounds()
    );
    if let Some(cutoffs) = source.health_cutoffs() {
        eprintln!(
            "health cutoffs: rct {}, apt {}/{}",
            cutoffs.rct, cutoffs.apt, cutoffs.apt_window
        );
    }
    let hex: String = input.iter().map(|b| format!("{b:02x}")).collect();
    println!("{hex}");
    Ok(())
}
