//! Generate random bytes and output as hex or raw binary.

use std::io::Write;

use rbg_crypto::drbg::{Drbg, HmacDrbg, HmacSha1Drbg};
use rbg_crypto::entropy::{EntropySource, JitterConfig, JitterSource};
use rbg_types::RbgError;

pub fn run(
    num: usize,
    strength: u32,
    resist: bool,
    persona: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if num == 0 || num > 1_048_576 {
        return Err("num must be between 1 and 1048576".into());
    }
    if format != "hex" && format != "raw" {
        return Err(format!("unsupported format: {format} (use hex or raw)").into());
    }

    let source = JitterSource::new(JitterConfig::default());
    let mut drbg = Drbg::instantiated(
        HmacSha1Drbg::default(),
        source,
        strength,
        resist,
        persona.as_bytes(),
    )?;
    let buf = generate_bytes(&mut drbg, num, resist)?;

    if format == "hex" {
        println!("{}", hex(&buf));
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&buf)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Fill `num` bytes, splitting into requests the mechanism accepts.
pub(crate) fn generate_bytes<S: EntropySource>(
    drbg: &mut HmacDrbg<S>,
    num: usize,
    resist: bool,
) -> Result<Vec<u8>, RbgError> {
    let chunk = drbg.params().max_request_bits / 8;
    let mut buf = Vec::with_capacity(num);
    while buf.len() < num {
        let take = chunk.min(num - buf.len());
        buf.extend_from_slice(&drbg.generate(take * 8, None, resist, b"")?);
    }
    Ok(buf)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
