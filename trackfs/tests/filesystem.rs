mod common;

use common::*;
use track_dev::{DeviceError, TRACK_SIZE};
use trackfs::{
    Capacity, Error, TrackFileSystem, TrackIndex, CONTENT_MAX_LEN, MAX_FILE_COUNT, NAME_MAX_LEN,
};

#[test]
fn install_does_not_touch_the_medium() {
    let fs = fresh();
    assert!(disk(&fs).writes.is_empty());
    assert!(disk(&fs).reads.is_empty());
    assert!(fs.store().buffer().iter().all(|&b| b == 0));
}

#[test]
fn create_then_read() {
    let mut fs = fresh();
    assert_eq!(TrackIndex::new(1), fs.create("log", b"hello").unwrap());

    assert_eq!(b"hello", fs.read("log").unwrap());
    let file = fs.open("log").unwrap();
    assert_eq!("log", file.name());
    assert_eq!(6, file.data_length());
}

#[test]
fn create_writes_record_then_content() {
    let mut fs = fresh();
    fs.create("a", b"x").unwrap();
    fs.create("b", b"y").unwrap();

    assert_eq!(
        vec![(0, TRACK_SIZE), (1, TRACK_SIZE), (0, TRACK_SIZE), (2, TRACK_SIZE)],
        disk(&fs).writes
    );
}

#[test]
fn embedded_zeros_survive() {
    let mut fs = fresh();
    fs.create("bin", b"\0a\0\0b").unwrap();
    assert_eq!(b"\0a\0\0b", fs.read("bin").unwrap());
}

#[test]
fn empty_content() {
    let mut fs = fresh();
    fs.create("empty", b"").unwrap();
    assert_eq!(1, fs.open("empty").unwrap().data_length());
    assert!(fs.read("empty").unwrap().is_empty());
}

#[test]
fn list_follows_creation_order() {
    let mut fs = fresh();
    assert_eq!(0, fs.list().unwrap().len());

    for name in ["c", "a", "b"] {
        fs.create(name, name.as_bytes()).unwrap();
    }
    let names = fs.list().unwrap();
    assert_eq!(3, names.len());
    // 可以重新遍历
    assert_eq!(vec!["c", "a", "b"], names.clone().collect::<Vec<_>>());
    assert_eq!(vec!["c", "a", "b"], names.collect::<Vec<_>>());
}

#[test]
fn find_is_stable() {
    let mut fs = fresh();
    fs.create("first", b"1").unwrap();
    fs.create("second", b"2").unwrap();

    assert_eq!(Ok(TrackIndex::new(2)), fs.find("second"));
    fs.create("third", b"3").unwrap();
    assert_eq!(Ok(TrackIndex::new(2)), fs.find("second"));
    assert_eq!(Ok(TrackIndex::new(1)), fs.find("first"));
}

#[test]
fn unknown_name_changes_nothing() {
    let mut fs = fresh();
    fs.create("a", b"data").unwrap();
    let record = disk(&fs).track(0).to_vec();
    let writes = disk(&fs).writes.len();

    assert_eq!(Err(Error::NotFound), fs.read("ghost"));
    assert_eq!(Err(Error::NotFound), fs.find("A"));
    assert_eq!(record, disk(&fs).track(0));
    assert_eq!(writes, disk(&fs).writes.len());
}

#[test]
fn duplicate_name_is_refused() {
    let mut fs = fresh();
    fs.create("a", b"1").unwrap();
    assert_eq!(Err(Error::AlreadyExists), fs.create("a", b"2"));
    assert_eq!(b"1", fs.read("a").unwrap());
    assert_eq!(1, fs.list().unwrap().len());
}

#[test]
fn file_count_is_limited() {
    let mut fs = fresh();
    for i in 0..MAX_FILE_COUNT {
        let name = format!("f{i}");
        assert_eq!(TrackIndex::new(i + 1), fs.create(&name, b"").unwrap());
    }
    let writes = disk(&fs).writes.len();

    assert_eq!(
        Err(Error::CapacityExceeded(Capacity::Files)),
        fs.create("one-too-many", b"")
    );
    assert_eq!(writes, disk(&fs).writes.len());
    assert_eq!(b"", fs.read("f118").unwrap());
}

#[test]
fn name_rules() {
    let mut fs = fresh();
    let longest = "n".repeat(NAME_MAX_LEN);
    fs.create(&longest, b"ok").unwrap();
    assert_eq!(b"ok", fs.read(&longest).unwrap());

    let too_long = "n".repeat(NAME_MAX_LEN + 1);
    assert_eq!(
        Err(Error::CapacityExceeded(Capacity::NameLength)),
        fs.create(&too_long, b"")
    );
    assert_eq!(Err(Error::InvalidName), fs.create("", b""));
    assert_eq!(Err(Error::InvalidName), fs.create("a\0b", b""));
}

#[test]
fn content_length_is_limited() {
    let mut fs = fresh();
    let largest = vec![0x5Au8; CONTENT_MAX_LEN];
    fs.create("large", &largest).unwrap();
    assert_eq!(&largest[..], fs.read("large").unwrap());

    let writes = disk(&fs).writes.len();
    let too_large = vec![0x5Au8; CONTENT_MAX_LEN + 1];
    assert_eq!(
        Err(Error::CapacityExceeded(Capacity::ContentLength)),
        fs.create("huge", &too_large)
    );
    assert_eq!(writes, disk(&fs).writes.len());
    assert_eq!(Err(Error::NotFound), fs.find("huge"));
}

#[test]
fn failed_content_write_is_partial() {
    let mut fs = fresh();
    disk_mut(&mut fs).fail_writes_to = Some(1);

    assert_eq!(
        Err(Error::PartialWrite {
            track: TrackIndex::new(1),
            cause: DeviceError::Medium { track: 1 },
        }),
        fs.create("a", b"x")
    );
    // 名字已经登记
    assert_eq!(vec!["a"], fs.list().unwrap().collect::<Vec<_>>());
}

#[test]
fn failed_record_write_registers_nothing() {
    let mut fs = fresh();
    disk_mut(&mut fs).fail_writes_to = Some(0);

    assert_eq!(
        Err(Error::Device(DeviceError::Medium { track: 0 })),
        fs.create("a", b"x")
    );
    disk_mut(&mut fs).fail_writes_to = None;
    assert_eq!(0, fs.list().unwrap().len());
}

#[test]
fn garbage_record_is_corrupt_until_formatted() {
    let mut disk = RamDisk::new();
    disk.track_mut(0).fill(0xFF);
    let mut fs = mount(disk);

    assert_eq!(Err(Error::Corrupt(TrackIndex::RECORD)), fs.list().map(|n| n.len()));
    fs.format().unwrap();
    assert_eq!(0, fs.list().unwrap().len());
    assert_eq!(Some(&(0, TRACK_SIZE)), common::disk(&fs).writes.last());
}

#[test]
fn files_persist_across_mounts() {
    let mut fs = fresh();
    fs.create("keep", b"me").unwrap();
    let (disk, buffer) = fs.into_parts();

    let mut fs = TrackFileSystem::install(disk, buffer);
    assert_eq!(b"me", fs.read("keep").unwrap());
}

#[test]
fn execute_unknown_file() {
    let mut fs = fresh();
    assert_eq!(Err(Error::NotFound), unsafe { fs.execute("ghost", &[]) });
    assert_eq!(Err(Error::InvalidArgument), unsafe {
        fs.execute("ghost", &["bad\0arg"])
    });
}
