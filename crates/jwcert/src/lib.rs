//! Verification of signed certificate tokens.
//!
//! A certificate is a compact JWS token signed with RS256. [`CertificateVerifier`]
//! checks it against a PEM encoded RSA public key and reports either the
//! certificate's claims or one of five fixed failure classes:
//!
//! ```no_run
//! use jwcert::CertificateVerifier;
//!
//! fn show(pem: &str, token: &str) {
//!     let verifier = CertificateVerifier::new().default_key(pem);
//!     let result = verifier.verify(token, None);
//!     match result.payload() {
//!         Some(claims) => println!("awarded to {}", claims.certificate().recipient()),
//!         None => println!("{}", result.error().unwrap_or_default()),
//!     }
//! }
//! ```

mod error;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod certificate;
pub(crate) mod claims;
pub(crate) mod header;
pub(crate) mod key;
pub(crate) mod limits;
pub(crate) mod result;
pub(crate) mod utils;
pub(crate) mod verifier;

// Public Interface
pub use algorithm::{AlgorithmPolicy, AlgorithmType};
pub use certificate::Certificate;
pub use claims::{Claims, ClaimsValidation};
pub use error::{Error, Failure, Result};
pub use key::PublicKey;
pub use result::VerificationResult;
pub use verifier::CertificateVerifier;
