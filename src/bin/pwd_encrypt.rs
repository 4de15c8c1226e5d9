//! Password encryption CLI — thin wrapper over the envelope codec.
//!
//! Usage:
//!   pwd-encrypt <keyId> <publicKeyHex> <password> <timestamp>
//!
//! On success the encoded token is printed to stdout and the process exits 0.
//! On failure `ERROR:<message>` is printed to stderr and the process exits 1.

use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(token) => {
            println!("{}", token);
            ExitCode::SUCCESS
        }
        Err(msg) => {
            eprintln!("ERROR:{}", msg);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        return Err("usage: pwd-encrypt <keyId> <publicKeyHex> <password> <timestamp>".to_owned());
    }

    let key_id: u8 = args[0]
        .parse()
        .map_err(|_| format!("keyId must be 0-255, got '{}'", args[0]))?;

    pwd_envelope::encode_password(key_id, &args[1], &args[2], &args[3]).map_err(|e| e.to_string())
}
