fn main() {
    sls_pkl::app::cli::run();
}
