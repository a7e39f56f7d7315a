mod cli;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};

use clap::Parser;
use cli::{Cli, Command};
use track_dev::StagingBuffer;
use trackfs::TrackFileSystem;
use trackfs_fuse::{ImageFile, CYLINDER_SIZE};

fn fs_error(err: trackfs::Error) -> io::Error {
    io::Error::other(err.to_string())
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("image={:?} cylinders={}", cli.image, cli.cylinders);

    // format 与 pack 都从一张空映像开始
    let blank = matches!(cli.command, Command::Format | Command::Pack { .. });
    let file = if blank {
        let fd = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&cli.image)?;
        fd.set_len(cli.cylinders as u64 * CYLINDER_SIZE)?;
        fd
    } else {
        OpenOptions::new().read(true).write(true).open(&cli.image)?
    };
    let image = ImageFile::with_cylinders(file, cli.cylinders);
    let mut fs = TrackFileSystem::install(image, StagingBuffer::boxed());
    if blank {
        fs.format().map_err(fs_error)?;
    }

    match cli.command {
        Command::Format => {}
        Command::Pack { source } => {
            for entry in fs::read_dir(&source)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    log::warn!("skip non UTF-8 name {name:?}");
                    continue;
                };
                let data = fs::read(entry.path())?;
                let track = fs.create(name, &data).map_err(fs_error)?;
                println!("{name}: {} bytes on track {track}", data.len());
            }
        }
        Command::Create { name, words } => {
            let content = words.join(" ");
            fs.create(&name, content.as_bytes()).map_err(fs_error)?;
        }
        Command::Print { name } => {
            let content = fs.read(&name).map_err(fs_error)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(content)?;
            writeln!(stdout)?;
        }
        Command::List => {
            for name in fs.list().map_err(fs_error)? {
                println!("{name}");
            }
        }
    }

    Ok(())
}
