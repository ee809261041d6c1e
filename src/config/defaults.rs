//! Default values for configuration

/// Default cat fact endpoint (returns one fact per call)
pub fn default_cat_fact_url() -> String {
    std::env::var("PETFACTS_CAT_URL").unwrap_or_else(|_| "https://catfact.ninja/fact".to_string())
}

/// Default dog fact endpoint (returns a batch per call)
pub fn default_dog_fact_url() -> String {
    std::env::var("PETFACTS_DOG_URL")
        .unwrap_or_else(|_| "https://dogapi.dog/api/v2/facts".to_string())
}

/// Default number of dog facts requested per provider call
pub fn default_dog_batch_size() -> u32 {
    5
}

/// Default HTTP request timeout in seconds
pub fn default_provider_timeout() -> u64 {
    30
}

/// Default user agent string
pub fn default_user_agent() -> String {
    format!("petfacts/{}", env!("CARGO_PKG_VERSION"))
}

/// Default number of cat facts requested per gather run
pub fn default_cat_count() -> usize {
    10
}

/// Default number of dog facts requested per gather run
pub fn default_dog_count() -> usize {
    10
}

/// Default attempt budget multiplier: a fetch loop gives up after
/// `requested * multiplier` provider calls
pub fn default_attempt_multiplier() -> u32 {
    20
}

/// Default CSV report file name (relative to the base directory)
pub fn default_csv_file() -> String {
    "word_frequency.csv".to_string()
}

/// Default chart output directory name (relative to the base directory)
pub fn default_chart_dir() -> String {
    "charts".to_string()
}

/// Default number of words shown in each bar chart
pub fn default_top_words() -> usize {
    20
}
