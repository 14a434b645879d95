use crate::error::CliError;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Anonymous encryption to Ed25519 public keys.
///
/// Keys, points, scalars, signatures and ciphertexts are read and written as hex strings.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Output format. The default is plain hex.
    #[arg(long = "output", short = 'o', env = "ANONYMOUS_OUTPUT", value_enum, default_value_t = OutputFormat::Hex)]
    pub output: OutputFormat,
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Hex,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate a new key pair.
    #[command(name = "keygen", alias = "new")]
    Keygen,
    /// Encrypt a message to a public key.
    #[command(name = "encrypt", alias = "enc")]
    Encrypt {
        /// The recipient's public key (32 bytes, hex).
        #[arg(long = "key", short = 'k')]
        public_key: String,
        #[command(flatten)]
        message: MessageArgs,
    },
    /// Decrypt a ciphertext with a private key.
    #[command(name = "decrypt", alias = "dec")]
    Decrypt {
        /// The recipient's private key (64 bytes, hex).
        #[arg(long = "key", short = 'k')]
        private_key: String,
        /// The ciphertext (hex).
        ciphertext: String,
        /// Print the recovered message as hex instead of text.
        #[arg(long = "hex", default_value_t = false)]
        hex: bool,
    },
    /// Sign a message.
    #[command(name = "sign")]
    Sign {
        /// The signer's private key (64 bytes, hex).
        #[arg(long = "key", short = 'k')]
        private_key: String,
        #[command(flatten)]
        message: MessageArgs,
    },
    /// Verify a signature.
    #[command(name = "verify")]
    Verify {
        /// The signer's public key (32 bytes, hex).
        #[arg(long = "key", short = 'k')]
        public_key: String,
        /// The signature (64 bytes, hex).
        #[arg(long = "signature", short = 's')]
        signature: String,
        #[command(flatten)]
        message: MessageArgs,
    },
    /// Edwards25519 point arithmetic.
    #[command(subcommand, name = "point")]
    Point(PointCommand),
}

#[derive(Debug, Subcommand)]
pub enum PointCommand {
    /// Add two points.
    #[command(name = "add")]
    Add { p1: String, p2: String },
    /// Subtract the second point from the first.
    #[command(name = "sub")]
    Sub { p1: String, p2: String },
    /// Multiply a point by a 32-byte little-endian scalar.
    #[command(name = "mul")]
    Mul { point: String, scalar: String },
    /// Multiply the base point by a 32-byte little-endian scalar.
    #[command(name = "base-mul")]
    BaseMul { scalar: String },
    /// Check whether a 32-byte string encodes a point on the curve.
    #[command(name = "check")]
    Check { point: String },
}

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// The message.
    pub message: String,
    /// Interpret MESSAGE as hex rather than text.
    #[arg(long = "hex", default_value_t = false)]
    pub hex: bool,
}

impl MessageArgs {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CliError> {
        match self.hex {
            true => decode_hex("message", &self.message),
            false => Ok(self.message.as_bytes().to_vec()),
        }
    }
}

pub fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, CliError> {
    hex::decode(value.trim()).map_err(|source| CliError::InvalidHex { field, source })
}

pub struct GlobalOptions {
    pub output: OutputFormat,
}

impl Config {
    pub fn to_parts(self) -> (GlobalOptions, CliCommand) {
        let global = GlobalOptions { output: self.output };
        (global, self.command)
    }
}
