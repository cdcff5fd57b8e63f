/// Tracks the chain of messages currently being read, so that a field or nested
/// message/enum can find its immediately enclosing message, and so that a closing message can
/// find the range of definitions it contains.
///
/// This is the Rust realization of `upb`'s bounded C array of scope frames; since Rust has no
/// static nesting-depth ceiling to configure, depth is bounded only by the recursion the
/// `FileDescriptorSet` tree itself encodes, which `prost`'s own decode already limits.
///
/// Name qualification itself is not tracked here: each closing message or file only ever needs
/// to prepend its own bare name to the definitions nested inside it (see
/// [`DefList::qualify`](crate::def::DefList::qualify)), accumulating the full dotted name one
/// level at a time as each enclosing scope closes in turn, so the stack only needs to remember
/// *where* each scope's definitions start.
#[derive(Debug, Default)]
pub(crate) struct ScopeStack {
    /// One entry per currently open message: the index into the `DefList` of the first
    /// definition nested directly inside it. The message's own definition is always the entry
    /// immediately before this index — see [`container_index`](Self::container_index).
    start_indices: Vec<usize>,
    package: String,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        ScopeStack {
            start_indices: Vec::new(),
            package: String::new(),
        }
    }

    /// Sets the containing file's package, establishing the outermost name prefix. Called once
    /// per file, before [`crate::reader::DescriptorReader::end_file`] applies it.
    pub(crate) fn set_package(&mut self, package: String) {
        self.package = package;
    }

    /// The current file's package, as set by [`set_package`](Self::set_package).
    pub(crate) fn package(&self) -> &str {
        &self.package
    }

    /// Enters a new scope for a message whose own definition was just pushed, recording
    /// `defs_len` (the `DefList` length right after that push) as the start of its nested
    /// definitions.
    pub(crate) fn enter(&mut self, defs_len: usize) {
        // `prost`'s own decode already rejects a wire stream nested deeper than this before a
        // tree this deep could ever reach here; this is a cheap sanity check on that assumption,
        // not a ceiling this type enforces itself.
        debug_assert!(
            self.start_indices.len() < 64,
            "message nesting depth exceeded the decoder's expected bound"
        );
        self.start_indices.push(defs_len);
    }

    /// Leaves the innermost scope, returning the index of the first definition nested inside it,
    /// so the caller can qualify that range.
    pub(crate) fn leave(&mut self) -> usize {
        self.start_indices
            .pop()
            .expect("leave() called without a matching enter()")
    }

    /// The index of the `Definition` belonging to the innermost enclosing message, i.e. the
    /// message currently being read. Relies on the invariant that a message's own definition is
    /// always appended to the list immediately before its scope is entered.
    pub(crate) fn container_index(&self) -> Option<usize> {
        self.start_indices.last().map(|start| start - 1)
    }

    pub(crate) fn depth(&self) -> usize {
        self.start_indices.len()
    }
}
