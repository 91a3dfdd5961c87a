mod app;
mod dashboard;
mod fetch;
mod lead_detail;
mod register;

use app::App;

fn main() {
    leptos::mount_to_body(App);
}
