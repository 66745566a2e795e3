use debox::prelude::*;
use debox::{MapSurface, Marker};

const SNOW: &str = r#"{"items":[
    {"id":"S-1","title":"세종대로 제설함","dept":"종로구청","lat":37.5762,"lng":126.9770},
    {"id":"S-2","title":"사직로 제설함","dept":"종로구청","lat":37.5745,"lng":126.9712},
    {"id":"S-3","title":"율곡로 제설함","dept":"종로구청","lat":37.5790,"lng":126.9855},
    {"id":"S-4","title":"을지로 제설함","dept":"중구청","lat":37.5660,"lng":126.9910}
]}"#;

const CALCIUM: &str = r#"{"items":[
    {"id":"C-1","title":"광화문 보관함","dept":"종로구청","lat":37.5758,"lng":126.9768,"type":"calcium"},
    {"id":"C-2","title":"서촌 보관함","dept":"종로구청","lat":37.5801,"lng":126.9700,"type":"calcium"}
]}"#;

fn print_frame(title: &str, viewer: &Viewer<HeadlessMap, StatusLine>) {
    println!("{title}");
    println!(
        "   {}: {} visible, {} placed around {}",
        viewer.display().label,
        viewer.display().visible_count,
        viewer.map().markers().len(),
        viewer.map().center()
    );
    for marker in viewer.map().markers().iter().take(3) {
        print_marker(marker);
    }
    println!();
}

fn print_marker(marker: &Marker) {
    println!("     - {} [{}] {}", marker.title, marker.detail.dept, marker.position);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to see every refresh
    env_logger::init();

    println!("=== debox - Headless Viewer ===\n");

    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("snow_boxes_final.json"), SNOW)?;
    std::fs::write(dir.path().join("calcium_final.json"), CALCIUM)?;

    let config = Config::default()
        .with_data_base(dir.path().to_string_lossy())
        .with_max_markers(3);
    let map = HeadlessMap::around(config.initial_center, 0.005, config.initial_level);
    let mut viewer = Viewer::start(config, map, StatusLine::default()).await?;
    print_frame("1. First frame", &viewer);

    viewer.handle(ViewerEvent::SwitchCategory(Category::Calcium));
    print_frame("2. Calcium tab", &viewer);

    if let Some(marker) = viewer.map().markers().first() {
        println!("3. Popup for {}", marker.id());
        println!("   {}\n", marker.open().content);
    }

    let mut moved = viewer.map().viewport();
    moved.center = LatLng::new(37.5660, 126.9910);
    moved.bounds = Bounds::new(37.5610, 126.9860, 37.5710, 126.9960);
    viewer.handle(ViewerEvent::SwitchCategory(Category::Snow));
    viewer.handle(ViewerEvent::ViewportChanged(moved));
    print_frame("4. Snow tab around Euljiro", &viewer);

    Ok(())
}
