//! File name rules at the upload and download boundary.

use std::collections::HashSet;

/// Extensions accepted at upload time.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"];

/// Whether a file name carries an image extension the reducer accepts.
///
/// Case-insensitive; a name without a dot is rejected.
pub fn is_supported_file_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported)),
        None => false,
    }
}

/// Name of the reduced artifact for an input called `name`.
///
/// Directory components are dropped and the final extension replaced, so
/// `"../shots/cat.PNG"` becomes `"reduced_cat.jpg"`.
pub fn output_file_name(name: &str) -> String {
    format!("reduced_{}.jpg", output_stem(name))
}

/// Output names for a whole batch, one per input and never repeated.
///
/// The first input with a given stem keeps the plain name; later ones get
/// their batch index appended, so `photo.png` and `photo.jpg` at slots 0
/// and 3 become `reduced_photo.jpg` and `reduced_photo_3.jpg`. Names are
/// compared ignoring ASCII case.
pub fn unique_output_file_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken = HashSet::with_capacity(names.len());
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let stem = output_stem(name.as_ref());
            let mut candidate = format!("reduced_{stem}.jpg");
            let mut retry = 0;
            while !taken.insert(candidate.to_ascii_lowercase()) {
                candidate = match retry {
                    0 => format!("reduced_{stem}_{index}.jpg"),
                    n => format!("reduced_{stem}_{index}_{n}.jpg"),
                };
                retry += 1;
            }
            candidate
        })
        .collect()
}

fn output_stem(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.chars().all(|c| c == '.') {
        return "image";
    }
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    }
}
