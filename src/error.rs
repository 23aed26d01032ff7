use thiserror::Error;

pub type Result<T> = std::result::Result<T, MenuError>;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("could not decode menu JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("schools CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("schools CSV row {row}: {message}")]
    SchoolRow { row: usize, message: String },

    #[error("unknown school level '{0}' (expected elementary, middle or high)")]
    UnknownLevel(String),

    #[error("unknown meal '{0}' (expected lunch or breakfast)")]
    UnknownMeal(String),

    #[error("document rendering failed: {0}")]
    Render(String),

    #[error("archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive already contains '{0}'")]
    DuplicateEntry(String),

    #[error("no flyers rendered ({empty_days} empty day(s), {failed_fetches} failed fetch(es))")]
    NoFlyers { empty_days: usize, failed_fetches: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
