use crate::config::{decode_hex, CliCommand, GlobalOptions, OutputFormat, PointCommand};
use crate::error::CliError;
use libanonymous::helpers::to_hex;
use libanonymous::{Keypair, PrivateKey, PublicKey};
use log::*;
use rand_core::OsRng;
use serde::Serialize;

/// The result of a command, before it is rendered for the terminal.
#[derive(Debug)]
pub enum CommandOutput {
    Keys(Keypair),
    Bytes(Vec<u8>),
    Message { message: Vec<u8>, as_hex: bool },
    Flag(bool),
}

#[derive(Serialize)]
struct KeysJson<'a> {
    public_key: &'a PublicKey,
    private_key: &'a str,
}

#[derive(Serialize)]
struct BytesJson<'a> {
    #[serde(serialize_with = "to_hex")]
    hex: &'a [u8],
}

#[derive(Serialize)]
struct MessageJson<'a> {
    text: Option<&'a str>,
    #[serde(serialize_with = "to_hex")]
    hex: &'a [u8],
}

#[derive(Serialize)]
struct FlagJson {
    valid: bool,
}

impl CommandOutput {
    pub fn render(&self, format: OutputFormat) -> Result<String, CliError> {
        let rendered = match (self, format) {
            (CommandOutput::Keys(keys), OutputFormat::Hex) => format!(
                "Public Key: {}\nPrivate Key: {}",
                keys.public_key(),
                keys.private_key().to_hex().as_str()
            ),
            (CommandOutput::Keys(keys), OutputFormat::Json) => {
                let private_key = keys.private_key().to_hex();
                serde_json::to_string_pretty(&KeysJson { public_key: keys.public_key(), private_key: &private_key })?
            }
            (CommandOutput::Bytes(bytes), OutputFormat::Hex) => hex::encode(bytes),
            (CommandOutput::Bytes(bytes), OutputFormat::Json) => {
                serde_json::to_string_pretty(&BytesJson { hex: bytes })?
            }
            (CommandOutput::Message { message, as_hex }, OutputFormat::Hex) => match std::str::from_utf8(message) {
                Ok(text) if !as_hex => text.to_string(),
                _ => hex::encode(message),
            },
            (CommandOutput::Message { message, .. }, OutputFormat::Json) => {
                let text = std::str::from_utf8(message).ok();
                serde_json::to_string_pretty(&MessageJson { text, hex: message })?
            }
            (CommandOutput::Flag(valid), OutputFormat::Hex) => valid.to_string(),
            (CommandOutput::Flag(valid), OutputFormat::Json) => {
                serde_json::to_string_pretty(&FlagJson { valid: *valid })?
            }
        };
        Ok(rendered)
    }
}

pub fn execute(command: CliCommand, _options: &GlobalOptions) -> Result<CommandOutput, CliError> {
    match command {
        CliCommand::Keygen => {
            info!("Generating a new key pair");
            Ok(CommandOutput::Keys(Keypair::generate(&mut OsRng)))
        }
        CliCommand::Encrypt { public_key, message } => {
            let public_key = decode_hex("public key", &public_key)?;
            let message = message.to_bytes()?;
            debug!("Encrypting a {}-byte message", message.len());
            Ok(CommandOutput::Bytes(libanonymous::encrypt(&public_key, &message)?))
        }
        CliCommand::Decrypt { private_key, ciphertext, hex } => {
            let private_key = PrivateKey::from_hex(private_key.trim())?;
            let ciphertext = decode_hex("ciphertext", &ciphertext)?;
            let message = private_key.decrypt(&ciphertext)?;
            Ok(CommandOutput::Message { message, as_hex: hex })
        }
        CliCommand::Sign { private_key, message } => {
            let private_key = PrivateKey::from_hex(private_key.trim())?;
            let signature = private_key.sign(&message.to_bytes()?)?;
            Ok(CommandOutput::Bytes(signature.to_vec()))
        }
        CliCommand::Verify { public_key, signature, message } => {
            let public_key = decode_hex("public key", &public_key)?;
            let signature = decode_hex("signature", &signature)?;
            let valid = libanonymous::verify(&public_key, &message.to_bytes()?, &signature);
            if !valid {
                warn!("Signature did not verify");
            }
            Ok(CommandOutput::Flag(valid))
        }
        CliCommand::Point(cmd) => exec_point_command(cmd),
    }
}

fn exec_point_command(cmd: PointCommand) -> Result<CommandOutput, CliError> {
    let result = match cmd {
        PointCommand::Add { p1, p2 } => libanonymous::add(&decode_hex("p1", &p1)?, &decode_hex("p2", &p2)?)?,
        PointCommand::Sub { p1, p2 } => libanonymous::sub(&decode_hex("p1", &p1)?, &decode_hex("p2", &p2)?)?,
        PointCommand::Mul { point, scalar } => {
            libanonymous::scalar_mult(&decode_hex("point", &point)?, &decode_hex("scalar", &scalar)?)?
        }
        PointCommand::BaseMul { scalar } => libanonymous::scalar_base_mult(&decode_hex("scalar", &scalar)?)?,
        PointCommand::Check { point } => {
            return Ok(CommandOutput::Flag(libanonymous::is_on_curve(&decode_hex("point", &point)?)));
        }
    };
    Ok(CommandOutput::Bytes(result.to_vec()))
}
