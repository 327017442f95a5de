//! Registry for readers and writers.
//!
//! Both tables are built once on first use and never change afterwards.
//! Writers are present according to the enabled `write-*` features.

use crate::input;
use crate::tags::{SourceTag, TargetTag};
use crate::traits::{Reader, Writer};
use std::sync::OnceLock;

static READERS: OnceLock<Vec<&'static dyn Reader>> = OnceLock::new();
static WRITERS: OnceLock<Vec<&'static dyn Writer>> = OnceLock::new();

fn reader_table() -> &'static [&'static dyn Reader] {
    READERS.get_or_init(|| {
        let readers: [&'static dyn Reader; 9] = [
            &input::NATURAL_READER,
            &input::PSEUDOCODE_READER,
            &input::JAVASCRIPT_READER,
            &input::TYPESCRIPT_READER,
            &input::PYTHON_READER,
            &input::JAVA_READER,
            &input::SCALA_READER,
            &input::RUST_READER,
            &input::GO_READER,
        ];
        readers.to_vec()
    })
}

fn writer_table() -> &'static [&'static dyn Writer] {
    WRITERS.get_or_init(|| {
        #[allow(unused_mut)]
        let mut writers: Vec<&'static dyn Writer> = Vec::new();
        #[cfg(feature = "write-pseudocode")]
        {
            writers.push(&crate::output::pseudocode::PSEUDOCODE_WRITER);
        }
        #[cfg(feature = "write-javascript")]
        {
            writers.push(&crate::output::javascript::JAVASCRIPT_WRITER);
        }
        #[cfg(feature = "write-typescript")]
        {
            writers.push(&crate::output::typescript::TYPESCRIPT_WRITER);
        }
        #[cfg(feature = "write-python")]
        {
            writers.push(&crate::output::python::PYTHON_WRITER);
        }
        #[cfg(feature = "write-java")]
        {
            writers.push(&crate::output::java::JAVA_WRITER);
        }
        #[cfg(feature = "write-scala")]
        {
            writers.push(&crate::output::scala::SCALA_WRITER);
        }
        #[cfg(feature = "write-go")]
        {
            writers.push(&crate::output::go::GO_WRITER);
        }
        writers
    })
}

/// Get the reader for a source tag.
pub fn reader_for_language(tag: SourceTag) -> Option<&'static dyn Reader> {
    reader_table()
        .iter()
        .find(|r| r.language() == tag)
        .copied()
}

/// Get a reader by file extension.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    reader_table()
        .iter()
        .find(|r| r.extensions().contains(&ext))
        .copied()
}

/// Get the writer for a target tag, if one is compiled in.
pub fn writer_for_language(tag: TargetTag) -> Option<&'static dyn Writer> {
    writer_table()
        .iter()
        .find(|w| w.language() == tag)
        .copied()
}

/// Get all registered readers.
pub fn readers() -> &'static [&'static dyn Reader] {
    reader_table()
}

/// Get all registered writers.
pub fn writers() -> &'static [&'static dyn Writer] {
    writer_table()
}
