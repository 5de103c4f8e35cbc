use std::ffi::{CStr, CString};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::backend::Backend;

/// Number of program slots in a [`ProgramTable`].
pub const MAX_PROGRAMS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn gl_enum(&self) -> u32 {
        match self {
            StageKind::Vertex => gl::VERTEX_SHADER,
            StageKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// Fixed table of shader program slots.
///
/// The table owns the driver backend and a diagnostic sink; every failure in
/// the load/compile/link pipeline is written to the sink and the pipeline
/// keeps going with a degraded handle. Callers render with whatever handle a
/// slot ends up holding; handle 0 means "no valid program".
///
/// Operations on a slot index outside the table are silently ignored.
pub struct ProgramTable<B: Backend, W: Write = io::Stderr> {
    backend: B,
    diag: W,
    slots: [u32; MAX_PROGRAMS],
}

impl<B: Backend> ProgramTable<B> {
    pub fn new(backend: B) -> Self {
        Self::with_diagnostics(backend, io::stderr())
    }
}

impl<B: Backend, W: Write> ProgramTable<B, W> {
    pub fn with_diagnostics(backend: B, diag: W) -> Self {
        Self {
            backend,
            diag,
            slots: [0; MAX_PROGRAMS],
        }
    }

    /// Reads shader source text into a NUL-terminated buffer.
    ///
    /// Returns `None` for an unreadable or empty file, after reporting the
    /// path to the diagnostic sink. An empty file is never read.
    pub fn load_source(&mut self, path: &Path) -> Option<CString> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                let _ = writeln!(
                    self.diag,
                    "ERROR: couldn't open file <{}>: {e}",
                    path.display()
                );
                return None;
            }
        };

        let size = match file_size(&mut file) {
            Ok(size) => size,
            Err(e) => {
                let _ = writeln!(
                    self.diag,
                    "ERROR: couldn't read file <{}>: {e}",
                    path.display()
                );
                return None;
            }
        };

        if size == 0 {
            return None;
        }

        let mut buffer = Vec::with_capacity(size as usize + 1);
        if let Err(e) = file.read_to_end(&mut buffer) {
            let _ = writeln!(
                self.diag,
                "ERROR: couldn't read file <{}>: {e}",
                path.display()
            );
            return None;
        }

        match CString::new(buffer) {
            Ok(source) => Some(source),
            Err(_) => {
                let _ = writeln!(
                    self.diag,
                    "ERROR: shader source <{}> contains a NUL byte",
                    path.display()
                );
                None
            }
        }
    }

    /// Compiles one stage, returning its handle or the sentinel 0.
    ///
    /// On failure the full driver log goes to the diagnostic sink and the
    /// stage object is deleted before returning.
    pub fn compile_stage(&mut self, kind: StageKind, source: &CStr) -> u32 {
        let stage = self.backend.create_shader(kind);
        self.backend.shader_source(stage, source);
        self.backend.compile_shader(stage);

        if !self.backend.compile_status(stage) {
            let log = self.backend.shader_info_log(stage);
            let _ = writeln!(self.diag, "{log}");
            self.backend.delete_shader(stage);
            return 0;
        }

        stage
    }

    /// Puts a fresh empty program object into `slot`.
    pub fn create_program(&mut self, slot: usize) {
        if slot >= self.slots.len() {
            return;
        }

        self.slots[slot] = self.backend.create_program();
    }

    /// Loads, compiles and attaches one stage to the program in `slot`, then
    /// links and validates the program.
    ///
    /// A failed load attaches nothing (the load already reported the error).
    /// A failed compile attaches the sentinel handle 0, which the driver
    /// ignores; the link that follows is then checked and its log surfaced.
    /// Linking after every attach means the first attach links a partial
    /// program; the state after the last attach is the one that counts.
    pub fn attach_stage(&mut self, slot: usize, path: &Path, kind: StageKind) {
        if slot >= self.slots.len() {
            return;
        }

        let source = match self.load_source(path) {
            Some(source) => source,
            None => return,
        };

        let stage = self.compile_stage(kind, &source);
        drop(source);

        let program = self.slots[slot];
        self.backend.attach_shader(program, stage);
        self.backend.link_program(program);

        if !self.backend.link_status(program) {
            let log = self.backend.program_info_log(program);
            let _ = writeln!(self.diag, "ERROR: program link failed: {log}");
        }

        self.backend.validate_program(program);

        // A linked program keeps its own copy of the compiled code; deleting
        // the sentinel 0 here is a no-op at the driver.
        self.backend.delete_shader(stage);
    }

    /// Current handle in `slot`, 0 when empty or out of range.
    pub fn handle(&self, slot: usize) -> u32 {
        self.slots.get(slot).copied().unwrap_or(0)
    }

    /// Deletes every program in the table. Safe to call more than once.
    pub fn destroy_all(&mut self) {
        for slot in &mut self.slots {
            if *slot != 0 {
                self.backend.delete_program(*slot);
                *slot = 0;
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: Backend, W: Write> Drop for ProgramTable<B, W> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

fn file_size(file: &mut File) -> io::Result<u64> {
    let size = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;

    Ok(size)
}
