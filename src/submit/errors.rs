use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("submission cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    #[error("batch cancelled at item {} after {attempts} attempt(s) on it", .index + 1)]
    BatchCancelled { index: usize, attempts: u32 },
}
