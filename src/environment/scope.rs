use std::collections::HashMap;

/// One lexical frame: name bindings plus a link to the enclosing frame.
struct Frame<V, F> {
    variables: HashMap<String, V>,
    functions: HashMap<(String, usize), F>,
    parent: Option<usize>,
}

impl<V, F> Frame<V, F> {
    fn new(parent: Option<usize>) -> Self {
        Frame {
            variables: HashMap::new(),
            functions: HashMap::new(),
            parent,
        }
    }
}

/// A chain of lexical frames stored in an arena.
///
/// Frames hold their parent as an index rather than a reference, and follow
/// strict stack discipline: `exit` destroys the frame entered by the matching
/// `enter`, along with everything nested inside it. `enter_at` starts a frame
/// whose lookup chain continues from an older frame, which is how a method
/// call resumes the scope its definition captured.
pub struct Scope<V, F> {
    frames: Vec<Frame<V, F>>,
    current: usize,
    saved: Vec<usize>,
}

impl<V, F> Scope<V, F> {
    pub fn new() -> Self {
        Scope {
            frames: vec![Frame::new(None)],
            current: 0,
            saved: vec![],
        }
    }

    /// Index of the innermost frame, usable later with `enter_at`.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Opens a frame nested inside the current one.
    pub fn enter(&mut self) {
        self.enter_at(self.current);
    }

    /// Opens a frame whose parent is `parent`, which must still be alive.
    pub fn enter_at(&mut self, parent: usize) {
        self.saved.push(self.current);
        self.frames.push(Frame::new(Some(parent)));
        self.current = self.frames.len() - 1;
    }

    /// Closes the innermost entered frame and everything nested inside it.
    /// A bare root scope has nothing to exit.
    pub fn exit(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.frames.truncate(self.current);
            self.current = previous;
        }
    }

    pub fn define_variable(&mut self, name: &str, value: V) {
        self.frames[self.current]
            .variables
            .insert(String::from(name), value);
    }

    pub fn define_function(&mut self, name: &str, arity: usize, function: F) {
        self.frames[self.current]
            .functions
            .insert((String::from(name), arity), function);
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&V> {
        let frame = self.find_variable_frame(name)?;
        self.frames[frame].variables.get(name)
    }

    pub fn lookup_variable_mut(&mut self, name: &str) -> Option<&mut V> {
        let frame = self.find_variable_frame(name)?;
        self.frames[frame].variables.get_mut(name)
    }

    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<&F> {
        let mut frame = Some(self.current);
        let key = (String::from(name), arity);
        while let Some(index) = frame {
            if let Some(function) = self.frames[index].functions.get(&key) {
                return Some(function);
            }
            frame = self.frames[index].parent;
        }
        None
    }

    /// Innermost frame in the chain holding `name`, if any.
    fn find_variable_frame(&self, name: &str) -> Option<usize> {
        let mut frame = Some(self.current);
        while let Some(index) = frame {
            if self.frames[index].variables.contains_key(name) {
                return Some(index);
            }
            frame = self.frames[index].parent;
        }
        None
    }
}

impl<V, F> Default for Scope<V, F> {
    fn default() -> Self {
        Scope::new()
    }
}
