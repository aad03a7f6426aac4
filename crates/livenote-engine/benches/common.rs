// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_note(size: usize) -> String {
    let base = "# Title\n\nParagraph with **bold**, _italic_ and `code`.\n\n- Bullet point\n  - Nested item\n- [ ] Open task\n- [x] Done task\n1. First\n> Quoted $e^{i\\pi} + 1 = 0$\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n$$\n\\sum_{i=0}^{n} x_i\n$$\n\n";
    base.repeat(size)
}

/// Byte range of `lines` lines starting at line `first` (0-based).
#[allow(dead_code)]
pub fn viewport(text: &str, first: usize, lines: usize) -> (usize, usize) {
    let starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect();
    let start = starts.get(first).copied().unwrap_or(text.len());
    let end = starts
        .get(first + lines)
        .map(|s| s - 1)
        .unwrap_or(text.len());
    (start, end)
}
