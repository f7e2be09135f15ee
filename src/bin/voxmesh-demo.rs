use clap::{Parser, Subcommand};
use color_eyre::eyre::Error;
use voxmesh::{
    mesh,
    rle,
    terrain::{ChunkPos, DemoTerrain, WorldSeed},
};

#[derive(Debug, Parser)]
struct Args {
    #[clap(long, default_value = "0")]
    seed: WorldSeed,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a demo chunk and mesh it, printing per-face quad counts.
    Mesh {
        #[clap(long, default_value_t = 0)]
        x: i32,
        #[clap(long, default_value_t = 0)]
        y: i32,
        #[clap(long, default_value_t = 0)]
        z: i32,
    },
    /// Generate a demo chunk, RLE round-trip it, and print the compression ratio.
    Roundtrip {
        #[clap(long, default_value_t = 0)]
        x: i32,
        #[clap(long, default_value_t = 0)]
        y: i32,
        #[clap(long, default_value_t = 0)]
        z: i32,
    },
}

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let terrain = DemoTerrain::new(args.seed);

    match args.command {
        Command::Mesh { x, y, z } => {
            let (voxels, columns) = terrain.generate(ChunkPos { x, y, z });

            let start = std::time::Instant::now();
            let mesh_data = mesh(&voxels, columns);
            let elapsed = start.elapsed();

            println!("meshed chunk ({x}, {y}, {z}) in {elapsed:?}");
            for (face, span) in mesh_data.face_spans.iter().enumerate() {
                println!("  face {face}: {} quads", span.len);
            }
            println!("total: {} quads", mesh_data.quads.len());
        }
        Command::Roundtrip { x, y, z } => {
            let (voxels, _) = terrain.generate(ChunkPos { x, y, z });

            let compressed = rle::compress(&voxels);
            let (decoded, _) = rle::decompress(&compressed)?;

            if *decoded != *voxels {
                color_eyre::eyre::bail!("roundtrip produced a different voxel grid");
            }

            let raw_size = std::mem::size_of_val(&*voxels);
            let ratio = compressed.len() as f64 / raw_size as f64;
            println!(
                "chunk ({x}, {y}, {z}): {raw_size} bytes raw -> {} bytes RLE ({:.1}% of original)",
                compressed.len(),
                ratio * 100.0
            );
        }
    }

    Ok(())
}
