//! # Corpus Sources

use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek},
    path::{Path, PathBuf},
};

/// A random-access byte source which can hand out independent cursors.
///
/// Every call to [`CorpusSource::open_cursor`] returns a fresh cursor,
/// so parallel workers never share a stream position.
pub trait CorpusSource: Sync {
    /// The cursor type.
    type Cursor<'a>: Read + Seek
    where
        Self: 'a;

    /// Open a new, independent cursor positioned at the start.
    fn open_cursor(&self) -> io::Result<Self::Cursor<'_>>;
}

impl CorpusSource for Path {
    type Cursor<'a> = BufReader<File>;

    fn open_cursor(&self) -> io::Result<Self::Cursor<'_>> {
        File::open(self).map(BufReader::new)
    }
}

impl CorpusSource for PathBuf {
    type Cursor<'a> = BufReader<File>;

    fn open_cursor(&self) -> io::Result<Self::Cursor<'_>> {
        self.as_path().open_cursor()
    }
}

impl CorpusSource for [u8] {
    type Cursor<'a> = Cursor<&'a [u8]>;

    fn open_cursor(&self) -> io::Result<Self::Cursor<'_>> {
        Ok(Cursor::new(self))
    }
}

impl CorpusSource for Vec<u8> {
    type Cursor<'a> = Cursor<&'a [u8]>;

    fn open_cursor(&self) -> io::Result<Self::Cursor<'_>> {
        Ok(Cursor::new(self.as_slice()))
    }
}
