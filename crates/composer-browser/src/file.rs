//! Browser file handles.

use composer_core::MediaFile;
use smol_str::SmolStr;
use web_sys::{File, FileList};

/// A `web_sys::File` with its metadata read once up front.
///
/// The underlying blob stays owned by the browser; cloning only clones the
/// JS handle.
#[derive(Clone, Debug)]
pub struct BrowserFile {
    file: File,
    name: SmolStr,
    content_type: SmolStr,
    size: u64,
}

impl BrowserFile {
    pub fn as_file(&self) -> &File {
        &self.file
    }
}

impl From<File> for BrowserFile {
    fn from(file: File) -> Self {
        Self {
            name: SmolStr::from(file.name()),
            content_type: SmolStr::from(file.type_()),
            size: file.size() as u64,
            file,
        }
    }
}

impl MediaFile for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn byte_size(&self) -> u64 {
        self.size
    }
}

/// Collect a picker or drop `FileList` in order.
pub fn files_from_list(list: &FileList) -> Vec<BrowserFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile::from)
        .collect()
}
