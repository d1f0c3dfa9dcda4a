/// Steps of an import, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Geometry,
    Scene,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Decode => "Decoding MOL table",
            Self::Geometry => "Building geometry",
            Self::Scene => "Populating scene",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    StageStart(Stage),
    StageFinish(Stage),

    /// Number of objects the current stage will emit.
    ObjectsPlanned { total: u64 },
    ObjectDone,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
