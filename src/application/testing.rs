//! Test doubles for the application layer

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::entities::ProducedFile;
use crate::domain::ports::{Producer, ProducerLoader};
use crate::domain::value_objects::FileSnapshot;
use crate::error::{ProducersError, ProducersResult};

type ProduceFn = Rc<dyn Fn(&FileSnapshot) -> ProducersResult<Vec<ProducedFile>>>;

/// In-memory loader keyed by absolute producer path.
///
/// Redefining a path models an edit to the producer's source: handles that
/// were already loaded keep the old behavior until reloaded.
#[derive(Clone, Default)]
pub struct FakeLoader {
    definitions: Rc<RefCell<HashMap<PathBuf, ProduceFn>>>,
    loads: Rc<Cell<usize>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define<F>(&self, path: impl Into<PathBuf>, produce: F)
    where
        F: Fn(&FileSnapshot) -> ProducersResult<Vec<ProducedFile>> + 'static,
    {
        self.definitions
            .borrow_mut()
            .insert(path.into(), Rc::new(produce));
    }

    /// Producer that always emits the same single file
    pub fn define_constant(
        &self,
        path: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        content: &str,
    ) {
        let target = target.into();
        let content = content.to_string();
        self.define(path, move |_| {
            Ok(vec![ProducedFile::new(target.clone(), content.clone())])
        });
    }

    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

struct FakeProducer(ProduceFn);

impl Producer for FakeProducer {
    fn produce(&self, snapshot: &FileSnapshot) -> ProducersResult<Vec<ProducedFile>> {
        (self.0)(snapshot)
    }
}

impl ProducerLoader for FakeLoader {
    fn load(&self, path: &Path) -> ProducersResult<Box<dyn Producer>> {
        self.loads.set(self.loads.get() + 1);
        match self.definitions.borrow().get(path) {
            Some(produce) => Ok(Box::new(FakeProducer(Rc::clone(produce)))),
            None => Err(ProducersError::load(path, "no such producer")),
        }
    }
}
