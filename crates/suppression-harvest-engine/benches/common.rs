// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2

/// A log with `errors` reported errors, where only `distinct` rules differ.
#[allow(dead_code)]
pub fn generate_log(errors: usize, distinct: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..errors {
        lines.push(format!("==4242== Invalid read of size 8 (error {i})\n"));
        lines.push("==4242==    at 0x4005F4: main (main.c:12)\n".to_string());
        lines.push("{\n".to_string());
        lines.push("   <insert a suppression name here>\n".to_string());
        lines.push("   Memcheck:Addr8\n".to_string());
        lines.push(format!("   fun:handler_{}\n", i % distinct.max(1)));
        lines.push("   fun:main\n".to_string());
        lines.push("}\n".to_string());
    }
    lines
}

/// A log where every marker is missing its closing delimiter.
#[allow(dead_code)]
pub fn generate_unterminated_log(markers: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for _ in 0..markers {
        lines.push("{\n".to_string());
        lines.push("   <insert a suppression name here>\n".to_string());
        lines.push("   Memcheck:Leak\n".to_string());
    }
    lines
}
