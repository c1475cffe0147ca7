// SPDX-License-Identifier: MPL-2.0
use phrasebook::localizer::Localizer;
use phrasebook::source::{DictionarySource, DirectorySource};
use phrasebook::store::TranslationStore;
use std::path::PathBuf;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

const USAGE: &str = "\
Usage: phrasebook [OPTIONS] [KEY]...

Resolve dotted translation keys against the active language.

Options:
  --lang <TAG>      Use this language for the current invocation
  --set-lang <TAG>  Persist <TAG> as the preferred language
  --i18n-dir <DIR>  Load dictionaries from <DIR> instead of the bundled set
  --list            List available languages
  --keys            List every translation key of the active language
  -h, --help        Show this help
";

#[tokio::main]
async fn main() {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        return;
    }

    let list = args.contains("--list");
    let keys = args.contains("--keys");
    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap();
    let set_lang: Option<String> = args.opt_value_from_str("--set-lang").unwrap();
    let i18n_dir: Option<PathBuf> = args.opt_value_from_str("--i18n-dir").unwrap();

    let localizer = match i18n_dir {
        Some(dir) => {
            let source: Arc<dyn DictionarySource> = Arc::new(DirectorySource::new(dir));
            Localizer::deferred(source, lang).await
        }
        None => Localizer::preloaded(TranslationStore::bundled(), lang),
    };

    if list {
        for language in localizer.available_languages() {
            println!("{language}");
        }
        return;
    }

    if keys {
        for key in localizer.translation_keys() {
            println!("{key}");
        }
        return;
    }

    if let Some(choice) = set_lang {
        match choice.parse::<LanguageIdentifier>() {
            Ok(language) => {
                if let Err(error) = localizer.set_language(&language) {
                    eprintln!("{error}");
                    std::process::exit(1);
                }
                localizer.ready().await;
            }
            Err(_) => {
                eprintln!("Invalid language tag: {choice}");
                std::process::exit(1);
            }
        }
    }

    for key in args.finish() {
        match key.into_string() {
            Ok(key) => println!("{}", localizer.translate(&key)),
            Err(raw) => eprintln!("Ignoring non-UTF-8 key: {raw:?}"),
        }
    }
}
