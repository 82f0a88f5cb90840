// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC GlobalId generation (22 character compressed UUID)

use uuid::Uuid;

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Compress a UUID into the IFC base64 encoding.
///
/// The first character carries the top 2 bits, the remaining 21 characters
/// 6 bits each.
pub fn compress(uuid: Uuid) -> String {
    let n = uuid.as_u128();
    let mut out = String::with_capacity(22);
    out.push(ALPHABET[(n >> 126) as usize] as char);
    for i in (0..21).rev() {
        out.push(ALPHABET[((n >> (i * 6)) & 0x3f) as usize] as char);
    }
    out
}

/// New random GlobalId
pub fn new() -> String {
    compress(Uuid::new_v4())
}
