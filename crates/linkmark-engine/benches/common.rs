// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_pasted_text(paragraphs: usize) -> String {
    let base = "Read [the guide](https://example.com/guide) first, then look at \
                ![a diagram](diagram.png) and the [FAQ](https://example.com/faq).\n\
                Plain prose without any links in it, just to pad the paragraph out.\n\n";
    base.repeat(paragraphs)
}

#[allow(dead_code)]
pub fn generate_plain_text(paragraphs: usize) -> String {
    "Nothing to convert here, only [brackets] and (parens) apart.\n".repeat(paragraphs)
}
