use clap::{Parser, Subcommand};
use dungeon_layout_generator::constants::Direction4;
use dungeon_layout_generator::dataset::DungeonDataset;
use dungeon_layout_generator::generate_layout::{generate_layout, LayoutGeneratorConfig};
use dungeon_layout_generator::room::RoomId;
use dungeon_layout_generator::runtime_builder::{RuntimeBuilder, RuntimeBuilderConfig};

#[derive(Parser, Debug)]
#[command(name = "ascii_dungeon")]
#[command(about = "Print generated dungeon layouts as text", long_about = None)]
struct Args {
    /// Seed for reproducible layouts
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Generate a whole main path with an optional bonus room
    Batch {
        #[arg(long, default_value_t = 120)]
        width: u32,
        #[arg(long, default_value_t = 50)]
        depth: u32,
        #[arg(short = 'n', long, default_value_t = 7)]
        rooms: usize,
    },
    /// Grow a dungeon room by room, e.g. `grow 0:right 1:up 0:left`
    Grow {
        #[arg(value_parser = parse_step)]
        steps: Vec<(usize, Direction4)>,
    },
}

fn parse_step(s: &str) -> Result<(usize, Direction4), String> {
    let (room, dir) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ROOM:DIRECTION, got {:?}", s))?;
    let room = room.parse::<usize>().map_err(|e| e.to_string())?;
    let dir = match dir {
        "left" | "a" => Direction4::Left,
        "right" | "d" => Direction4::Right,
        "up" | "w" => Direction4::Up,
        "down" | "s" => Direction4::Down,
        other => return Err(format!("unknown direction {:?}", other)),
    };
    Ok((room, dir))
}

fn print_dataset(dataset: &DungeonDataset) {
    println!("{}", dataset.render_ascii());
    for room in dataset.rooms() {
        println!(
            "{} {:<8} at ({}, {}) {}x{} doors={}",
            room.id,
            room.room_type.name(),
            room.bounds.x,
            room.bounds.z,
            room.bounds.width,
            room.bounds.depth,
            dataset.degree(room.id)
        );
    }
}

fn main() {
    let args = Args::parse();

    match args.mode {
        Mode::Batch {
            width,
            depth,
            rooms,
        } => {
            let dataset = generate_layout(LayoutGeneratorConfig {
                width,
                depth,
                main_room_count: rooms,
                room_width_range: 6..=12,
                room_depth_range: 6..=12,
                corridor_step_x: 4,
                z_drift: 6,
                seed: args.seed,
                ..Default::default()
            });
            print_dataset(&dataset);
        }
        Mode::Grow { steps } => {
            let mut builder = match RuntimeBuilder::new(RuntimeBuilderConfig {
                seed: args.seed,
                ..Default::default()
            }) {
                Ok(builder) => builder,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
            };
            builder.initialize();
            for (room, dir) in steps {
                match builder.try_expand_from(RoomId::new(room), dir.to_vec2()) {
                    Ok(created) => println!("{} {:?} -> {}", room, dir, created.id),
                    Err(e) => println!("{} {:?} failed: {}", room, dir, e),
                }
            }
            print_dataset(&builder.dataset());
        }
    }
}
