//! Core traits for digest accumulators

/// Streaming digest accumulator: consumes byte chunks and eventually yields a
/// textual digest.
///
/// Each instance owns its internal state exclusively; an accumulator is never
/// shared across algorithms or across input runs. `finalize` may only be
/// called after every chunk has been fed.
pub trait Digester: Send {
    /// Feed the next chunk of input bytes.
    fn update(&mut self, chunk: &[u8]);

    /// Consume the accumulator and return the digest string.
    fn finalize(self: Box<Self>) -> String;
}

/// Factory producing a fresh accumulator for a single input run.
///
/// The argument is the declared total input length, when the source knows it
/// up front (file size, Content-Length). `None` for sources that cannot
/// predict their size, such as standard input.
pub type DigesterFactory = Box<dyn Fn(Option<u64>) -> Box<dyn Digester> + Send + Sync>;
