use rand::{seq::SliceRandom, Rng};

const ADJECTIVES: [&str; 10] = [
    "Fearless",
    "Dreadful",
    "Savage",
    "Fierce",
    "Ruthless",
    "Notorious",
    "Infamous",
    "Brave",
    "Cunning",
    "Bold",
];

const NOUNS: [&str; 10] = [
    "Seadog",
    "Corsair",
    "Scallywag",
    "Buccaneer",
    "Swashbuckler",
    "Privateer",
    "Marauder",
    "Scourge",
    "Cutlass",
    "Jolly Roger",
];

const QUALITIES: [&str; 8] = [
    "Weathered",
    "Handcrafted",
    "Sleek",
    "Rugged",
    "Ergonomic",
    "Gilded",
    "Tarred",
    "Rustic",
];

const MATERIALS: [&str; 6] = ["oak", "teak", "brass", "iron", "canvas", "mahogany"];

const PRODUCTS: [&str; 6] = [
    "galleon",
    "sloop",
    "brigantine",
    "frigate",
    "schooner",
    "man-o'-war",
];

const PURPOSES: [&str; 6] = [
    "outrunning the navy",
    "hauling plunder between ports",
    "long voyages across the Seven Seas",
    "boarding merchant vessels",
    "riding out a storm",
    "hunting buried treasure",
];

const SHIP_IMAGES: [&str; 32] = [
    "bafkreibtqt4mp4saddqsla7tjgnu6gvrkwrzxpu7mltkkwzjhhx6tyf7na",
    "bafkreido37di7kcynpjvcanujz4tgpbryvptv4gn3zhd3gtdihrgppswyi",
    "bafkreihbpnlicraewdc32qnpvgsj725da2b7qcqcy5rikcj2dgr6v5cxxy",
    "bafkreih2i5iqyz4zb6qjzmbf2dmu3lc6h6mnqedhqsyo5fovouwhjqiwka",
    "bafkreibfznm4xiu2yfchuf6budwnlwg7zkw36vt67eupjswmdxbfaxiwtm",
    "bafkreid74afcywoo2be5u63xu3ptveg3ge7pcrzaax4xwiznqdtoogk7ie",
    "bafkreievs5qe52kk2mqmsu65kznx7n6ivobrnqrz6uch7obt277t3b4zvu",
    "bafkreigdfqwuddqhggcbb3vq4mkanji24by234ydsk2jpc6qt4q4ek33ue",
    "bafkreierusunr54m56wb2ph3q6agnb5a73syk2javxkpsuheqedyduqupi",
    "bafkreihhbnshnnpwvw2cajiujnftewc3boi26p2lc6lpekgtufce6ruevq",
    "bafkreifklhhzudssq7hmiuimisei7lcux7bw37glvmkovhknmcf2cn4inm",
    "bafkreifdsucn63v5l3v4dyzdz4ib5k4dmsp4rzm64ierp7jbcavhvknfru",
    "bafkreidpuebkbeioom3xxsmrddhhlqrmcebbyxajav3sbnkkd4ak255wwi",
    "bafkreifkmgriy2anmum5af2ifkcg6pj6ce5eh3g7j4qk2j2llmjex5wwoq",
    "bafkreie4lfx4co2bw3szua3qht3t6f3ytcjmxokzkvrpa7ks32w7s46lyy",
    "bafkreiaquqs2tdonmeyt4gj6p4vliebzwu4set6qnyeyya7mebg3qasnri",
    "bafkreicf7pahjfldvpfh3zs2nxmmeg4ffqq7q5vnkfpm46wa3wgnyo7rie",
    "bafkreihfdejyxxifa6qqvsifk7naa6fycru3ndtri4nakj5hka2qvkqhim",
    "bafkreigkgge56j5chhuzwggczwcj75pi6jwkf62mivvjwgptdbbsnscxuq",
    "bafkreiedrwuogtjnxawcxsxz3c5z3h2swrmxe7te7ncmz53uipjvkf7kke",
    "bafkreifz2mjdilfcaxm2platlj4t7fsiasu2t7s6eeiof2iuymlaczm33u",
    "bafkreih3wqnmxxijzkkkbl24lv46ia4f3luyardtsvtsgrd2lcmnmweqia",
    "bafkreics4ixtau55it5dmnciukwcw3hgubfuowfhqagbdwvg3z2gknflze",
    "bafkreiahl7ufdcwnkagcd6wbirl6n42orcjf22aa5rbnyowstojsamdika",
    "bafkreigogp744lpbdnra7iaeaw3gpi6cnxo52bg4nigw4owitjlebetmau",
    "bafkreibkqz6tn6j6n4zlg5o5y6wcb3s5k5kvhpukdkbzwbhhweg6zlwz5q",
    "bafkreibnclnkx5n7kqa2iwmadaqhpls43csepnxk3bn2e3b5npop7jael4",
    "bafkreia4sdzap5a3kz6taiysdpb3nuo5umnyxm5ap7jwphqaedq6htbfg4",
    "bafkreiedqconadnozvmzjccqougxl2owwlyu5sywtaqspqtjyaxuof67aq",
    "bafkreicl4fl4ieffty3qgucx7xtjrdcg7e2f65cmipal2hpcs6bnwori74",
    "bafkreidslcs6bvqafikjuwccryvx444mheesmoxifo7nspof6syr4uzmtq",
    "bafkreicumoxi3uyhwjce5rkazmmzf2uniyy3zo7g6lmjejn3cotel55iqy",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

pub fn random_ship_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, &ADJECTIVES), pick(rng, &NOUNS))
}

pub fn random_description<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}, built for {}.",
        pick(rng, &QUALITIES),
        pick(rng, &MATERIALS),
        pick(rng, &PRODUCTS),
        pick(rng, &PURPOSES)
    )
}

/// Image for the `index`-th ship; wraps around the image set.
pub fn ship_image_url(index: usize) -> String {
    format!(
        "https://{}.ipfs.nftstorage.link/",
        SHIP_IMAGES[index % SHIP_IMAGES.len()]
    )
}
