use thiserror::Error;

/// Why no job data could be pulled out of a fetched page.
///
/// The variants are ordered diagnoses, not just failures: a blocked page
/// and an auth wall call for different operator fixes, so the cascade
/// inspects the page before settling on the generic case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error(
        "the site served a bot challenge instead of the posting; open the job in a browser, save it as HTML, and pass the file path"
    )]
    Blocked,

    #[error(
        "the posting is behind a sign-in wall; export cookies to cookies.txt or save the page as HTML and pass the file path"
    )]
    AuthRequired,

    #[error("no job data found in the page; save the posting as HTML and pass the file path")]
    NoData,
}
