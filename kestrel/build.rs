use std::io::{self, BufWriter, Write};
use std::{env, fs, path::Path};

use kestrel_base::types::Cell;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

const SQUARES: usize = 128;

struct Zobrist {
    pieces: [[u64; SQUARES]; Cell::COUNT],
    move_side: u64,
    castling: [u64; 16],
    enpassant: [u64; SQUARES],
}

impl Zobrist {
    fn generate<R: RngCore>(gen: &mut R) -> Zobrist {
        let pieces = {
            // Row 0 is the empty cell and hashes to zero.
            let mut res = [[0_u64; SQUARES]; Cell::COUNT];
            for sub in res.iter_mut().skip(1) {
                for x in sub.iter_mut() {
                    *x = gen.next_u64();
                }
            }
            res
        };

        // Each single castling right gets an independent key; a composite mask hashes to
        // the XOR of its bits. This keeps the table XOR-decomposable, so the hash delta
        // of any rights change is `CASTLING[old ^ new]`.
        let singles: [u64; 4] = [(); 4].map(|_| gen.next_u64());
        let mut castling = [0_u64; 16];
        for (mask, entry) in castling.iter_mut().enumerate() {
            for (bit, key) in singles.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    *entry ^= key;
                }
            }
        }

        Zobrist {
            pieces,
            move_side: gen.next_u64(),
            castling,
            enpassant: [(); SQUARES].map(|_| gen.next_u64()),
        }
    }

    fn generate_default() -> Zobrist {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x8E57_5EED_BA5E_0001_u64);
        Self::generate(&mut rng)
    }

    fn output<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "pub const PIECES: [[u64; 128]; 13] = [")?;
        for (i, sub) in self.pieces.iter().enumerate() {
            writeln!(w, "    /*{:2}*/ [", i)?;
            for (i, hsh) in sub.iter().enumerate() {
                writeln!(w, "        /*{:3}*/ {:#x},", i, hsh)?;
            }
            writeln!(w, "    ],")?;
        }
        writeln!(w, "];\n")?;

        writeln!(w, "pub const MOVE_SIDE: u64 = {:#x};\n", self.move_side)?;

        writeln!(w, "pub const CASTLING: [u64; 16] = [")?;
        for (i, sub) in self.castling.iter().enumerate() {
            writeln!(w, "    /*{:2}*/ {:#x},", i, sub)?;
        }
        writeln!(w, "];\n")?;

        writeln!(w, "pub const ENPASSANT: [u64; 128] = [")?;
        for (i, sub) in self.enpassant.iter().enumerate() {
            writeln!(w, "    /*{:3}*/ {:#x},", i, sub)?;
        }
        writeln!(w, "];")?;

        Ok(())
    }
}

fn gen_zobrist(out_path: &Path) -> io::Result<()> {
    Zobrist::generate_default().output(&mut BufWriter::new(&mut fs::File::create(out_path)?))?;
    Ok(())
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").unwrap();

    gen_zobrist(&Path::new(&out_dir).join("zobrist.rs"))?;

    Ok(())
}
