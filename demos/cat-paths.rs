use std::env;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use shapeline::read::shapefile::PolylineStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args();

    if args.len() != 2 {
        writeln!(&mut io::stderr(), "Usage: {} <BASE_PATH_WITHOUT_EXTENSION>", args.next().unwrap()).unwrap();
        process::exit(1);
    }

    args.next();
    let base = PathBuf::from(args.next().unwrap());

    let mut store = PolylineStore::new();
    match store.load(&base) {
        Err(err) => {
            writeln!(&mut io::stderr(), "{}", err).unwrap();
            process::exit(1);
        }
        Ok(()) => {
            for (i, path) in store.paths().iter().enumerate() {
                println!("path {} ({} vertices): {}", i, path.len(), path);
            }
            println!("CRS: {}", store.crs());
            println!("Read {} paths", store.paths().len());
        }
    }
}
