//! Demo session: drives the editor core against the loopback emulator and
//! prints what the transport and UI layers would see.

use glam::Vec3;

use veld_editor::{
    Blueprint, Dispatcher, Editor, EditorNotification, EngineEmulator, ParentLink, Transform,
};

fn main() {
    env_logger::init();

    let player = "LocalPlayer";
    let mut dispatcher = Dispatcher::new(Editor::new(player));
    let emulator = EngineEmulator::new(player);
    dispatcher.bus.subscribe(|n: &EditorNotification| {
        println!("ui <- {:?}", n);
    });

    let crate_bp = Blueprint::new("Crate_01");
    let barrel_bp = Blueprint::new("Barrel_02");

    // Spawn a parent and a child under it.
    let parent = dispatcher
        .editor
        .spawn_blueprint(
            Some(&crate_bp),
            Some(Transform::from_translation(Vec3::new(10.0, 0.0, 4.0))),
            None,
            None,
        )
        .expect("blueprint present");
    settle(&mut dispatcher, &emulator);

    dispatcher.editor.spawn_blueprint(
        Some(&barrel_bp),
        None,
        None,
        Some(ParentLink::under(parent)),
    );
    settle(&mut dispatcher, &emulator);

    println!(
        "mirror: {} objects, {} pending",
        dispatcher.editor.scene.len(),
        dispatcher.editor.scene.pending_len()
    );

    // Duplicate the selection, then take it all back.
    dispatcher.editor.duplicate();
    settle(&mut dispatcher, &emulator);
    println!("after duplicate: {} objects", dispatcher.editor.scene.len());

    dispatcher.editor.undo();
    settle(&mut dispatcher, &emulator);
    dispatcher.editor.undo();
    settle(&mut dispatcher, &emulator);
    dispatcher.editor.undo();
    settle(&mut dispatcher, &emulator);
    println!("after undo x3: {} objects", dispatcher.editor.scene.len());
}

/// Loop outbound requests through the emulator until the mirror settles.
fn settle(dispatcher: &mut Dispatcher, emulator: &EngineEmulator) {
    loop {
        let requests = dispatcher.editor.requests().drain();
        if requests.is_empty() {
            break;
        }
        for request in requests {
            // The real transport would serialize this onto the wire.
            if let Ok(json) = serde_json::to_string(&request) {
                log::debug!("wire -> {}", json);
            }
            for message in emulator.respond(request) {
                dispatcher.inbound().send(message);
            }
        }
        dispatcher.pump();
    }
}
