//! The single sink every interpreter component reports through.
//!
//! A `Reporter` owns the line tracker ([`SourceMap`]) so that positions can
//! be turned into file names, the [`DiagnosticQueue`], and an optional
//! emitter that prints each diagnostic as soon as it is accepted.

use mad_ir::SourceMap;

use crate::{render, Diagnostic, DiagnosticConfig, DiagnosticEmitter, DiagnosticQueue, Severity};

pub struct Reporter {
    sources: SourceMap,
    queue: DiagnosticQueue,
    emitter: Option<Box<dyn DiagnosticEmitter>>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DiagnosticConfig::default())
    }
}

impl Reporter {
    pub fn new(config: DiagnosticConfig) -> Self {
        Reporter {
            sources: SourceMap::new(),
            queue: DiagnosticQueue::with_config(config),
            emitter: None,
        }
    }

    pub fn set_emitter(&mut self, emitter: Box<dyn DiagnosticEmitter>) {
        self.emitter = Some(emitter);
    }

    pub fn take_emitter(&mut self) -> Option<Box<dyn DiagnosticEmitter>> {
        self.emitter.take()
    }

    /// Log, queue and emit `diagnostic`. Returns false if the queue dropped it.
    pub fn report(&mut self, diagnostic: Diagnostic) -> bool {
        let line = render(&diagnostic, &self.sources);
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(code = %diagnostic.code, "{line}"),
            Severity::Fatal => tracing::error!(code = %diagnostic.code, "{line}"),
        }
        if !self.queue.add(diagnostic) {
            return false;
        }
        if let (Some(emitter), Some(last)) = (self.emitter.as_mut(), self.queue.as_slice().last())
        {
            emitter.emit(last, &self.sources);
        }
        true
    }

    /// Flush the emitter and print the warning/fatal summary.
    pub fn finish(&mut self) {
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.emit_summary(self.queue.warning_count(), self.queue.fatal_count());
            emitter.flush();
        }
    }

    pub fn queue(&self) -> &DiagnosticQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut DiagnosticQueue {
        &mut self.queue
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceMap {
        &mut self.sources
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("sources", &self.sources)
            .field("queue", &self.queue)
            .field("emitter", &self.emitter.is_some())
            .finish()
    }
}
