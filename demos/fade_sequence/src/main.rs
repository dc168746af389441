use flo_effects::*;

use flo_binding::*;
use futures::executor;

use std::sync::*;
use std::thread;
use std::time::{Duration};

///
/// Releases a delay timeline's completion registration
///
struct DelayRegistration {
    released:   Arc<Mutex<bool>>,
    kept_alive: bool
}

impl Releasable for DelayRegistration {
    fn keep_alive(&mut self) {
        self.kept_alive = true;
    }

    fn done(&mut self) {
        *self.released.lock().unwrap() = true;
    }
}

impl Drop for DelayRegistration {
    fn drop(&mut self) {
        if !self.kept_alive {
            *self.released.lock().unwrap() = true;
        }
    }
}

///
/// Stands in for a real animation system: a timeline that reaches its end a fixed
/// delay after it starts playing
///
struct DelayTimeline {
    name:       String,
    duration:   Duration,
    listeners:  Arc<Mutex<Vec<(Arc<dyn Notifiable>, Arc<Mutex<bool>>)>>>
}

impl DelayTimeline {
    fn new(name: &str, millis: u64) -> DelayTimeline {
        DelayTimeline {
            name:       String::from(name),
            duration:   Duration::from_millis(millis),
            listeners:  Arc::new(Mutex::new(vec![]))
        }
    }

    fn notify_completion(listeners: &Arc<Mutex<Vec<(Arc<dyn Notifiable>, Arc<Mutex<bool>>)>>>) {
        let live = {
            let mut listeners = listeners.lock().unwrap();

            listeners.retain(|(_, released)| !*released.lock().unwrap());
            listeners.iter().map(|(notify, _)| Arc::clone(notify)).collect::<Vec<_>>()
        };

        live.iter().for_each(|notify| notify.mark_as_changed());
    }
}

impl AnimationTimeline for DelayTimeline {
    fn play(&self) {
        println!("    playing {} ({}ms)", self.name, self.duration.as_millis());

        let name        = self.name.clone();
        let duration    = self.duration;
        let listeners   = Arc::clone(&self.listeners);

        thread::spawn(move || {
            thread::sleep(duration);
            println!("    {} reached its end", name);

            DelayTimeline::notify_completion(&listeners);
        });
    }

    fn pause(&self) {
        // A real timeline would stop its clock here
        println!("    pausing {}", self.name);
    }

    fn finish(&self) {
        println!("    skipping {} to its end", self.name);

        DelayTimeline::notify_completion(&self.listeners);
    }

    fn when_complete(&self, notify: Arc<dyn Notifiable>) -> Box<dyn Releasable> {
        let released = Arc::new(Mutex::new(false));

        self.listeners.lock().unwrap().push((notify, Arc::clone(&released)));

        Box::new(DelayRegistration {
            released:   released,
            kept_alive: false
        })
    }
}

fn main() {
    // A fade in, a slide and a grow together, then a fade out, played through twice
    let fade_in     = TimelineEffect::new(DelayTimeline::new("fade-in", 300));
    let slide       = TimelineEffect::new(DelayTimeline::new("slide-left", 450));
    let grow        = TimelineEffect::new(DelayTimeline::new("grow", 250));
    let fade_out    = TimelineEffect::new(DelayTimeline::new("fade-out", 300));

    let sequence    = AnimationTree::new();

    sequence
        .on(|| println!("Sequence starting"))
        .label("replay")
        .next(fade_in)
        .next(TreeStep::group(vec![slide, grow]))
        .next(fade_out)
        .goto("replay", |visits, _| visits < 2)
        .on(|| println!("Sequence complete"));

    // Watch the play state change as the sequence runs
    let play_state  = sequence.play_state();
    let mut watcher = {
        let observed = play_state.clone();
        play_state.when_changed(notify(move || println!("  [{:?}]", observed.get())))
    };

    sequence.play();

    match executor::block_on(sequence.finished()) {
        Ok(())      => println!("All effects finished"),
        Err(error)  => println!("Sequence failed: {}", error)
    }

    watcher.done();
}
