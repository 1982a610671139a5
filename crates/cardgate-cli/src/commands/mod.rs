/// `cardgate wrap`, `sign` and `fingerprint`: card file operations.
pub mod card;
/// `cardgate keygen`: create a key file.
pub mod keygen;
/// `cardgate verify`: check a card against a trust file.
pub mod verify;
