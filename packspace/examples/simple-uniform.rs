use packspace::PackingTree;

fn main() {
    env_logger::init();

    let mut tree = PackingTree::new((256, 256)).expect("region size is valid");

    for _ in 0..5 {
        match tree.insert((128, 128)) {
            Ok(placement) => println!("Placed at {:?}", placement.position()),
            Err(err) => println!("{}", err),
        }
    }

    println!("{:#?}", tree.stats());
}
