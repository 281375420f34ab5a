fn main() {
    yew::Renderer::<kana_dojo::components::App>::new().render();
}
