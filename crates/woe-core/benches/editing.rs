use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use woe_core::{Cursor, Editor, Key};

fn large_lines(line_count: usize) -> Vec<String> {
    (0..line_count)
        .map(|i| format!("{i:06}\tthe quick brown fox jumps over the lazy dog (woe-core benchmark line)"))
        .collect()
}

fn loaded_editor(lines: &[String]) -> Editor {
    let mut editor = Editor::default();
    editor.load_lines(lines);
    editor.resize(50, 120);
    editor
}

fn bench_load(c: &mut Criterion) {
    let lines = large_lines(50_000);
    c.bench_function("load/50k_lines", |b| {
        b.iter(|| {
            let editor = loaded_editor(black_box(&lines));
            black_box(editor.rows().len());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let lines = large_lines(50_000);
    c.bench_function("typing_middle/100_keys", |b| {
        b.iter_batched(
            || {
                let mut editor = loaded_editor(&lines);
                editor.set_cursor(Cursor::new(10, 25_000));
                editor.process_key(Key::Char('i'));
                editor
            },
            |mut editor| {
                for _ in 0..100 {
                    editor.process_key(Key::Char('x'));
                }
                black_box(editor.cursor());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_enter_and_backspace(c: &mut Criterion) {
    let lines = large_lines(10_000);
    c.bench_function("split_join/100_rounds", |b| {
        b.iter_batched(
            || {
                let mut editor = loaded_editor(&lines);
                editor.set_cursor(Cursor::new(20, 5_000));
                editor.process_key(Key::Char('i'));
                editor
            },
            |mut editor| {
                for _ in 0..100 {
                    editor.process_key(Key::Enter);
                    editor.process_key(Key::Backspace);
                }
                black_box(editor.rows().len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let lines = large_lines(50_000);
    let mut editor = loaded_editor(&lines);
    c.bench_function("render/frame_while_scrolling", |b| {
        b.iter(|| {
            editor.process_key(Key::PageDown);
            let frame = editor.render_frame();
            black_box(frame.to_ansi().len());
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let lines = large_lines(50_000);
    let mut editor = loaded_editor(&lines);
    c.bench_function("search/regex_50k_lines", |b| {
        b.iter(|| {
            editor.search(black_box("04999[0-9]"));
            black_box(editor.search_state().len());
        })
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_typing_in_middle,
    bench_enter_and_backspace,
    bench_render_frame,
    bench_search
);
criterion_main!(benches);
