//! Run the known-answer self tests and report each result.

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = 0;
    for (name, kat) in rbg_crypto::selftest::ALL {
        match kat() {
            Ok(()) => println!("{name}: ok"),
            Err(e) => {
                println!("{name}: FAILED ({e})");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} self test(s) failed").into());
    }
    println!("all self tests passed");
    Ok(())
}
