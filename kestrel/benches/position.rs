use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kestrel::{eval, Color, Move, MoveKind, Position, Square};

const POSITIONS: [(&str, &str); 5] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w - - 4 43",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w - - 0 1"),
];

fn positions() -> impl Iterator<Item = (&'static str, Position)> {
    POSITIONS
        .iter()
        .map(|&(name, fen)| (name, Position::from_fen(fen).unwrap()))
}

// A short opening line exercising double pushes, knight moves and a capture
fn opening_line(position: &Position) -> Vec<Move> {
    let mut position = position.clone();
    let mut moves = Vec::new();
    for (kind, from, to) in [
        (MoveKind::PawnDouble, "e2", "e4"),
        (MoveKind::PawnDouble, "e7", "e5"),
        (MoveKind::Simple, "g1", "f3"),
        (MoveKind::Simple, "b8", "c6"),
        (MoveKind::Simple, "f1", "c4"),
        (MoveKind::Simple, "g8", "f6"),
        (MoveKind::Simple, "f3", "e5"),
        (MoveKind::Simple, "c6", "e5"),
    ] {
        let src: Square = from.parse().unwrap();
        let dst: Square = to.parse().unwrap();
        let mv = Move::new(kind, src, dst, position.get(src), position.get(dst), None);
        position.make_move(mv);
        moves.push(mv);
    }
    moves
}

fn bench_make_undo(c: &mut Criterion) {
    let mut position = Position::initial();
    let moves = opening_line(&position);
    c.bench_function("make_undo", |b| {
        b.iter(|| {
            for mv in &moves {
                position.make_move(*mv);
            }
            for mv in moves.iter().rev() {
                position.undo_move(*mv);
            }
            black_box(position.zobrist_hash())
        })
    });
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, position) in positions() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for square in Square::iter() {
                        black_box(position.is_attacked(square, color));
                    }
                }
            })
        });
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for (name, position) in positions() {
        group.bench_function(name, |b| b.iter(|| black_box(eval::evaluate(&position))));
    }
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");
    for (name, position) in positions() {
        let fen = position.as_fen();
        group.bench_function(name, |b| {
            b.iter(|| black_box(Position::from_fen(&fen).unwrap().as_fen()))
        });
    }
}

criterion_group!(
    position,
    bench_make_undo,
    bench_is_attacked,
    bench_evaluate,
    bench_fen,
);

criterion_main!(position);
