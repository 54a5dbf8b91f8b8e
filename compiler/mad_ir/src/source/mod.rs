//! Source positions and the include-aware line tracker.
//!
//! Every definition records the global line it was read at (used for
//! ordering) plus the line within its own file (used for messages). Front
//! ends drive a `SourceMap` while reading: `enter_file` on an include,
//! `leave_file` when it ends, `next_line` on each newline.

use std::fmt;

/// Index of a file registered in a [`SourceMap`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(u32);

impl FileId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

/// Where a definition or diagnostic came from.
///
/// `file == None` means an in-memory buffer with no file name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePos {
    pub file: Option<FileId>,
    /// Global line counter across all included files.
    pub line: u32,
    /// Line within `file`.
    pub local_line: u32,
}

impl SourcePos {
    /// Line number reserved for text captured at end of input.
    pub const END_OF_FILE_LINE: u32 = u32::MAX;

    /// Position of text captured after the last line of input.
    pub const END_OF_FILE: SourcePos = SourcePos {
        file: None,
        line: Self::END_OF_FILE_LINE,
        local_line: Self::END_OF_FILE_LINE,
    };

    /// Position in an unnamed buffer.
    pub const fn buffer(line: u32) -> Self {
        SourcePos {
            file: None,
            line,
            local_line: line,
        }
    }

    pub const fn in_file(file: FileId, line: u32, local_line: u32) -> Self {
        SourcePos {
            file: Some(file),
            line,
            local_line,
        }
    }

    #[inline]
    pub const fn is_end_of_file(self) -> bool {
        self.line == Self::END_OF_FILE_LINE
    }
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    file: FileId,
    local_line: u32,
}

/// File names plus the stack of currently open includes.
#[derive(Clone, Debug)]
pub struct SourceMap {
    files: Vec<String>,
    stack: Vec<Frame>,
    current: Option<Frame>,
    line: u32,
}

impl Default for SourceMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceMap {
    pub fn new() -> Self {
        SourceMap {
            files: Vec::new(),
            stack: Vec::new(),
            current: None,
            line: 1,
        }
    }

    /// Start reading `path`, suspending the current file if there is one.
    pub fn enter_file(&mut self, path: impl Into<String>) -> FileId {
        let index = u32::try_from(self.files.len())
            .unwrap_or_else(|_| panic!("too many source files (max {})", u32::MAX));
        let file = FileId(index);
        self.files.push(path.into());
        if let Some(frame) = self.current.take() {
            self.stack.push(frame);
        }
        self.current = Some(Frame {
            file,
            local_line: 1,
        });
        file
    }

    /// Finish the current file and resume the one that included it.
    ///
    /// Returns the file that was left, or `None` if no file was open.
    pub fn leave_file(&mut self) -> Option<FileId> {
        let left = self.current.take()?;
        self.current = self.stack.pop();
        Some(left.file)
    }

    /// Advance both the global and the per-file line counter.
    pub fn next_line(&mut self) {
        self.line = self.line.saturating_add(1);
        if let Some(frame) = &mut self.current {
            frame.local_line = frame.local_line.saturating_add(1);
        }
    }

    /// Position of the line currently being read.
    pub fn current_pos(&self) -> SourcePos {
        match self.current {
            Some(frame) => SourcePos::in_file(frame.file, self.line, frame.local_line),
            None => SourcePos::buffer(self.line),
        }
    }

    pub fn file_name(&self, file: FileId) -> Option<&str> {
        self.files.get(file.index()).map(String::as_str)
    }

    /// Depth of nested includes (0 outside of any file).
    pub fn include_depth(&self) -> usize {
        self.stack.len() + usize::from(self.current.is_some())
    }
}
