use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rbx_validator::{Validator, ValidatorConfig, validate};

fn large_script(function_count: usize) -> String {
    let mut out = String::with_capacity(function_count * 160);
    out.push_str("local Players = game:GetService(\"Players\")\n");
    for i in 0..function_count {
        out.push_str(&format!(
            "local function handler{i}(part)\n\tif part.Name == \"Part{i}\" then\n\t\twait(0.1)\n\tend\nend\n"
        ));
    }
    out
}

fn bench_large_script(c: &mut Criterion) {
    let text = large_script(5_000);
    c.bench_function("validate/large_script_5k_functions", |b| {
        b.iter(|| {
            let result = validate(black_box(&text));
            black_box(result.warning_count());
        })
    });
}

fn bench_pathological_whitespace(c: &mut Criterion) {
    // Long runs that repeatedly start, but never finish, `while\s+true\s+do` and `wait\s*\(`.
    let mut text = String::new();
    for _ in 0..2_000 {
        text.push_str("while");
        text.push_str(&" ".repeat(64));
        text.push_str("true");
        text.push_str(&" ".repeat(64));
        text.push_str("wait");
        text.push_str(&" ".repeat(64));
        text.push('\n');
    }

    let validator = Validator::new(ValidatorConfig::default()).unwrap();
    c.bench_function("validate/pathological_whitespace", |b| {
        b.iter(|| black_box(validator.validate(black_box(&text))).error_count())
    });
}

criterion_group!(benches, bench_large_script, bench_pathological_whitespace);
criterion_main!(benches);
