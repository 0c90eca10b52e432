use std::collections::HashMap;

/// Free form key value pairs. Used for the opaque detail a verifier
/// attaches to a verification snapshot.
pub type Metadata = HashMap<String, String>;
