//! The nine authored levels
//!
//! Coordinates are in tiles. `GROUND_Y` is the floor surface; furniture is
//! anchored on the surface row it stands on.

use super::entity::Axis;
use super::level::{GROUND_Y as G, LayoutInfo, LevelBuilder, SpikeSide, palette};

const BOTTOM: f32 = super::level::BOTTOM_TILE_Y;

/// Author level `index` into `b`. Unknown indices get level 1.
pub(super) fn author(index: u32, b: &mut LevelBuilder) -> LayoutInfo {
    match index {
        2 => floor_is_lava(b),
        3 => extreme_furniture(b),
        4 => moving_day(b),
        5 => against_the_clock(b),
        6 => the_long_hallway(b),
        7 => fruit_bowl(b),
        8 => lamp_light(b),
        9 => omni_gauntlet(b),
        _ => living_room(b),
    }
}

fn living_room(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 15.0);
    b.sofa(8.0, G, 4.0, palette::SOFA_RED);
    b.checkpoint(1, 10.0, G - 3.0);

    b.floor(15.0, 12.0);
    b.table(18.0, G, 5.0);
    b.checkpoint(2, 20.0, G - 4.0);

    b.floor(27.0, 10.0);
    b.pit(37.0, 3.0);

    b.floor(40.0, 12.0);
    b.tv_stand(42.0, G);
    b.checkpoint(3, 42.0, G - 2.0);
    b.lamp(48.0, 5.0);

    b.floor(52.0, 15.0);
    b.bookshelf(60.0, G, 5.0);
    b.checkpoint(4, 60.0, G - 5.0);

    b.floor(67.0, 18.0);
    b.sofa(75.0, G, 5.0, palette::SOFA_BLUE);
    b.checkpoint(5, 75.0, G - 6.0);

    b.pit(85.0, 4.0);

    b.floor(89.0, 10.0);
    b.table(92.0, G, 4.0);
    b.lamp(94.0, 6.0);

    b.floor(99.0, 21.0);
    b.sofa(105.0, G, 4.0, palette::SOFA_RED);
    b.checkpoint(6, 115.0, G);

    LayoutInfo {
        name: "Living Room (Easy)",
        width_tiles: 120.0,
        time_limit_secs: None,
    }
}

fn floor_is_lava(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 22.0);
    b.rect(10.0, G - 5.0, 2.0, 5.0, palette::WOOD);
    b.checkpoint(1, 15.0, G);

    b.pit(22.0, 5.0);

    b.floor(27.0, 15.0);
    b.table(30.0, G, 6.0);
    b.spider(30.0, G - 4.0 - 0.6, 6.0);
    b.checkpoint(2, 38.0, G);

    b.pit(42.0, 4.0);

    b.floor(46.0, 10.0);
    b.bookshelf(50.0, G, 7.0);
    b.checkpoint(3, 50.0, G - 7.0);

    b.floor(56.0, 20.0);
    b.sofa(62.0, G, 5.0, palette::SOFA_RED);
    b.spider(63.0, G - 3.0 - 0.7, 3.0);
    b.checkpoint(4, 67.0, G);
    b.lamp(72.0, 8.0);

    b.pit(76.0, 6.0);

    b.floor(82.0, 15.0);
    b.tv_stand(88.0, G);
    b.checkpoint(5, 88.0, G - 2.0);

    b.pit(97.0, 5.0);

    b.floor(102.0, 10.0);
    b.bookshelf(105.0, G, 5.0);
    b.lamp(108.0, 7.0);

    b.floor(112.0, 15.0);
    b.table(115.0, G, 8.0);
    b.spider(115.0, G - 4.0 - 0.7, 8.0);

    b.floor(127.0, 20.0);
    b.checkpoint(6, 140.0, G);

    LayoutInfo {
        name: "The Floor is Lava (Medium)",
        width_tiles: 145.0,
        time_limit_secs: None,
    }
}

fn extreme_furniture(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 8.0);
    b.pit(8.0, 25.0);
    b.rect(12.0, G - 2.0, 2.0, 1.0, palette::WOOD);
    b.rect(18.0, G - 1.0, 2.0, 1.0, palette::WOOD);
    b.rect(24.0, G - 3.0, 2.0, 1.0, palette::WOOD);
    b.checkpoint(1, 25.0, G - 3.0 - 1.0);

    b.floor(33.0, 10.0);
    b.bookshelf(37.0, G, 6.0);
    b.checkpoint(2, 37.0, G - 6.0 - 1.0);

    b.floor(43.0, 5.0);
    b.pit(48.0, 10.0);

    b.floor(58.0, 12.0);
    b.spider(59.0, G - 1.0, 8.0);
    b.checkpoint(3, 64.0, G);

    b.floor(70.0, 5.0);
    b.pit(75.0, 30.0);
    b.table(80.0, G + 1.0, 4.0);
    b.sofa(90.0, G + 1.0, 4.0, palette::SOFA_BLUE);
    b.spider(92.0, G + 1.0 - 3.0 - 0.7, 3.0);
    b.checkpoint(4, 92.0, G + 1.0 - 3.0 - 1.0);

    b.floor(105.0, 12.0);
    b.tv_stand(110.0, G);
    b.checkpoint(5, 112.0, G - 5.0 - 1.0);

    b.pit(117.0, 8.0);
    b.floor(125.0, 10.0);
    b.bookshelf(128.0, G, 6.0);
    b.lamp(128.0, 5.0);

    b.pit(135.0, 10.0);
    b.rect(140.0, G, 2.0, 1.0, palette::WOOD);

    b.floor(145.0, 10.0);
    b.table(148.0, G, 5.0);
    b.spider(148.0, G - 4.0 - 0.7, 5.0);

    b.floor(155.0, 30.0);
    b.checkpoint(6, 175.0, G);

    LayoutInfo {
        name: "Extreme Furniture (Hard)",
        width_tiles: 185.0,
        time_limit_secs: None,
    }
}

fn moving_day(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 15.0);
    b.checkpoint(1, 10.0, G);

    b.pit(15.0, 10.0);
    b.moving_platform(16.0, G - 2.0, 3.0, 8.0, Axis::X);

    b.floor(25.0, 5.0);
    b.checkpoint(2, 27.0, G);

    b.pit(30.0, 20.0);
    b.moving_platform(30.0, G - 3.0, 3.0, 6.0, Axis::X);
    b.moving_platform(38.0, G - 1.0, 3.0, 6.0, Axis::X);

    b.floor(50.0, 8.0);
    b.bookshelf(53.0, G, 6.0);
    b.checkpoint(3, 53.0, G - 6.0 - 1.0);

    b.pit(58.0, 8.0);
    b.moving_platform(60.0, G - 6.0, 3.0, 6.0, Axis::Y);

    b.floor(66.0, 10.0);
    b.spider(67.0, G - 1.0, 8.0);
    b.checkpoint(4, 71.0, G);

    b.floor(76.0, 20.0);
    b.sofa(80.0, G, 5.0, palette::SOFA_RED);
    b.moving_platform(88.0, G - 5.0, 4.0, 15.0, Axis::X);

    b.pit(96.0, 12.0);

    b.floor(108.0, 10.0);
    b.tv_stand(110.0, G);
    b.checkpoint(5, 112.0, G - 5.0);

    b.pit(118.0, 15.0);
    b.moving_platform(118.0, G - 2.0, 3.0, 10.0, Axis::X);
    b.lamp(125.0, 6.0);

    b.floor(133.0, 27.0);
    b.checkpoint(6, 150.0, G);

    LayoutInfo {
        name: "Moving Day",
        width_tiles: 160.0,
        time_limit_secs: None,
    }
}

fn against_the_clock(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 10.0);
    b.checkpoint(1, 8.0, G);

    b.pit(10.0, 30.0);
    b.rect(12.0, G - 1.0, 2.0, 1.0, palette::WOOD);
    b.rect(16.0, G - 3.0, 2.0, 1.0, palette::WOOD);
    b.rect(20.0, G - 1.0, 2.0, 1.0, palette::WOOD);
    b.rect(24.0, G - 4.0, 2.0, 1.0, palette::WOOD);
    b.checkpoint(2, 24.0, G - 4.0 - 1.0);

    b.moving_platform(30.0, G - 7.0, 3.0, 6.0, Axis::Y);
    b.rect(36.0, G - 6.0, 4.0, 1.0, palette::WOOD);
    b.checkpoint(3, 38.0, G - 6.0 - 1.0);

    b.floor(40.0, 10.0);
    b.table(42.0, G, 6.0);
    b.spider(42.0, G - 4.0 - 0.7, 6.0);

    b.pit(50.0, 20.0);
    b.moving_platform(50.0, G - 2.0, 2.0, 8.0, Axis::X);
    b.moving_platform(60.0, G - 2.0, 2.0, 8.0, Axis::X);

    b.floor(70.0, 8.0);
    b.checkpoint(4, 74.0, G);

    b.pit(78.0, 15.0);
    b.rect(85.0, G - 3.0, 2.0, 1.0, palette::WOOD);
    b.lamp(82.0, 5.0);
    b.lamp(88.0, 5.0);

    b.floor(93.0, 10.0);
    b.bookshelf(96.0, G, 5.0);
    b.checkpoint(5, 96.0, G - 5.0 - 1.0);

    b.pit(103.0, 15.0);
    b.moving_platform(103.0, G - 1.0, 3.0, 12.0, Axis::X);
    b.lamp(110.0, 6.0);

    b.floor(118.0, 30.0);
    b.sofa(125.0, G, 4.0, palette::SOFA_BLUE);
    b.spider(125.0, G - 1.0, 10.0);
    b.checkpoint(6, 140.0, G);

    LayoutInfo {
        name: "Against the Clock",
        width_tiles: 150.0,
        time_limit_secs: Some(60),
    }
}

fn the_long_hallway(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 10.0);
    b.checkpoint(1, 5.0, G);

    b.pit(10.0, 10.0);
    b.moving_platform(10.0, G - 2.0, 3.0, 8.0, Axis::X);

    b.floor(20.0, 10.0);
    b.tv_stand(22.0, G);
    b.checkpoint(2, 24.0, G - 5.0);

    b.pit(30.0, 20.0);
    b.moving_platform(32.0, G - 6.0, 3.0, 6.0, Axis::Y);
    b.moving_platform(40.0, G - 10.0, 3.0, 8.0, Axis::Y);

    b.floor(50.0, 15.0);
    b.bookshelf(55.0, G, 8.0);
    b.checkpoint(3, 55.0, G - 8.0 - 1.0);

    b.floor(65.0, 20.0);
    b.table(70.0, G, 10.0);
    b.spider(70.0, G - 4.0 - 0.7, 10.0);
    b.spider(65.0, G - 1.0, 20.0);
    b.checkpoint(4, 80.0, G - 4.0 - 1.0);

    b.pit(85.0, 30.0);
    b.moving_platform(86.0, G - 2.0, 2.0, 5.0, Axis::X);
    b.rect(95.0, G - 4.0, 2.0, 1.0, palette::WOOD);
    b.moving_platform(100.0, G - 6.0, 2.0, 6.0, Axis::Y);
    b.lamp(105.0, 7.0);

    b.floor(115.0, 10.0);
    b.checkpoint(5, 120.0, G);

    b.pit(125.0, 30.0);
    b.moving_platform(125.0, G - 2.0, 3.0, 20.0, Axis::X);
    b.lamp(135.0, 6.0);
    b.rect(138.0, 0.0, 6.0, 2.0, palette::WOOD);
    for x in 138..144 {
        b.falling_spike(x as f32, 2.0);
    }
    b.lamp(145.0, 6.0);

    b.floor(155.0, 45.0);
    b.sofa(160.0, G, 5.0, palette::SOFA_RED);
    b.spider(160.0, G - 3.0 - 0.6, 5.0);
    b.table(170.0, G, 5.0);
    b.spider(170.0, G - 0.6, 5.0);
    b.spider(170.0, G - 4.0 - 0.6, 5.0);
    b.bookshelf(180.0, G, 6.0);
    b.checkpoint(6, 190.0, G);

    LayoutInfo {
        name: "The Long Hallway",
        width_tiles: 200.0,
        time_limit_secs: Some(180),
    }
}

fn fruit_bowl(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 8.0);
    b.checkpoint(1, 5.0, G);

    b.pit(8.0, 20.0);
    b.rect(12.0, G - 2.0, 2.0, 1.0, palette::WOOD);
    b.fruit_fly(15.0, G - 4.0, 6.0);
    b.rect(18.0, G - 1.0, 2.0, 1.0, palette::WOOD);
    b.fruit_fly(21.0, G - 3.0, 6.0);

    b.floor(28.0, 10.0);
    b.checkpoint(2, 32.0, G);

    b.pit(38.0, 25.0);
    b.spiked_moving_platform(40.0, G - 2.0, 3.0, 10.0, Axis::X, SpikeSide::Top);
    b.moving_platform(45.0, G - 5.0, 2.0, 6.0, Axis::X);
    b.fruit_fly(50.0, G - 6.0, 8.0);

    b.floor(63.0, 10.0);
    b.checkpoint(3, 68.0, G);
    b.falling_spike(72.0, G - 14.0);

    b.pit(73.0, 20.0);
    b.rect(75.0, G - 5.0, 2.0, 1.0, palette::WOOD);
    b.moving_platform(80.0, G - 8.0, 3.0, 6.0, Axis::Y);
    b.fruit_fly(80.0, G - 5.0, 5.0);

    b.floor(93.0, 15.0);
    b.tv_stand(96.0, G);
    b.fruit_fly(96.0, G - 3.0, 6.0);
    b.checkpoint(4, 100.0, G - 5.0);

    b.pit(108.0, 30.0);
    b.moving_platform(110.0, G - 3.0, 2.0, 4.0, Axis::Y);
    b.moving_platform(116.0, G - 4.0, 4.0, 5.0, Axis::Y);
    b.moving_platform(125.0, G - 3.0, 2.0, 4.0, Axis::Y);
    b.moving_platform(132.0, G - 4.0, 4.0, 5.0, Axis::Y);
    b.fruit_fly(112.0, G - 6.0, 20.0);
    b.fruit_fly(115.0, G - 2.0, 20.0);
    b.fruit_fly(120.0, G - 5.0, 20.0);

    b.floor(138.0, 10.0);
    b.checkpoint(5, 142.0, G);

    b.pit(148.0, 40.0);
    b.spiked_moving_platform(150.0, G - 2.0, 3.0, 15.0, Axis::X, SpikeSide::Top);
    b.spiked_moving_platform(165.0, G - 5.0, 3.0, 15.0, Axis::X, SpikeSide::Top);
    b.moving_platform(160.0, G - 8.0, 2.0, 20.0, Axis::X);
    b.rect(170.0, 0.0, 5.0, 1.0, palette::WOOD);
    b.falling_spike(170.0, 1.0);
    b.falling_spike(172.0, 1.0);
    b.falling_spike(174.0, 1.0);

    b.floor(188.0, 32.0);
    b.sofa(195.0, G, 4.0, palette::SOFA_RED);
    b.fruit_fly(195.0, G - 3.0, 6.0);
    b.spider(200.0, G - 1.0, 10.0);
    b.checkpoint(6, 210.0, G);

    LayoutInfo {
        name: "Fruit Bowl",
        width_tiles: 220.0,
        time_limit_secs: None,
    }
}

fn lamp_light(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 10.0);
    b.checkpoint(1, 5.0, G);

    b.pit(10.0, 20.0);
    b.moving_platform(12.0, G - 2.0, 2.0, 8.0, Axis::X);
    b.spiked_lamp(14.0, 8.0);
    b.moving_platform(22.0, G - 4.0, 2.0, 6.0, Axis::X);
    b.spiked_lamp(25.0, 6.0);

    b.floor(30.0, 12.0);
    b.table(32.0, G, 6.0);
    b.fruit_fly(35.0, G - 5.0, 5.0);
    b.checkpoint(2, 40.0, G);

    b.pit(45.0, 15.0);
    b.rect(48.0, G - 3.0, 2.0, 1.0, palette::WOOD);
    b.moving_platform(55.0, G - 6.0, 2.0, 8.0, Axis::Y);
    b.spiked_lamp(55.0, 6.0);
    b.bookshelf(65.0, G, 8.0);
    b.fruit_fly(62.0, G - 8.0, 8.0);
    b.checkpoint(3, 65.0, G - 8.0 - 1.0);

    b.floor(70.0, 30.0);
    b.sofa(75.0, G, 5.0, palette::SOFA_BLUE);
    b.spider(76.0, G - 3.7, 3.0);
    b.spiked_moving_platform(85.0, G - 6.0, 3.0, 10.0, Axis::X, SpikeSide::Bottom);
    b.spider(90.0, G - 1.0, 8.0);

    b.pit(100.0, 25.0);
    b.rect(102.0, G - 2.0, 2.0, 1.0, palette::WOOD);
    b.spiked_lamp(108.0, 9.0);
    b.spiked_lamp(112.0, 9.0);
    b.moving_platform(115.0, G - 4.0, 2.0, 8.0, Axis::X);
    b.checkpoint(4, 126.0, G);
    b.floor(125.0, 10.0);

    b.pit(135.0, 40.0);
    b.spiked_moving_platform(140.0, G - 2.0, 3.0, 6.0, Axis::Y, SpikeSide::Top);
    b.spiked_moving_platform(150.0, G - 8.0, 3.0, 6.0, Axis::Y, SpikeSide::Top);
    b.spiked_moving_platform(160.0, G - 2.0, 3.0, 6.0, Axis::Y, SpikeSide::Top);
    b.rect(145.0, G - 10.0, 2.0, 1.0, palette::WOOD);
    b.rect(155.0, G - 10.0, 2.0, 1.0, palette::WOOD);

    b.floor(175.0, 15.0);
    b.tv_stand(180.0, G);
    b.fruit_fly(180.0, G - 3.0, 5.0);
    b.checkpoint(5, 185.0, G);

    b.pit(190.0, 30.0);
    b.falling_spike(189.0, 0.0);
    b.moving_platform(195.0, G - 2.0, 2.0, 6.0, Axis::X);
    b.spiked_lamp(200.0, 10.0);
    b.moving_platform(205.0, G - 5.0, 2.0, 8.0, Axis::X);
    b.fruit_fly(205.0, G - 6.0, 10.0);

    b.floor(220.0, 20.0);
    b.checkpoint(6, 230.0, G);

    LayoutInfo {
        name: "Lamp Light",
        width_tiles: 240.0,
        time_limit_secs: Some(210),
    }
}

fn omni_gauntlet(b: &mut LevelBuilder) -> LayoutInfo {
    b.floor(0.0, 15.0);
    b.tv_stand(5.0, G);
    b.checkpoint(1, 12.0, G);

    // swarm bridge
    b.pit(15.0, 35.0);
    b.moving_platform(16.0, G - 2.0, 3.0, 10.0, Axis::X);
    b.moving_platform(28.0, G - 4.0, 3.0, 10.0, Axis::X);
    b.moving_platform(40.0, G - 2.0, 3.0, 8.0, Axis::X);
    b.fruit_fly(20.0, G - 6.0, 6.0);
    b.fruit_fly(25.0, G - 3.0, 6.0);
    b.fruit_fly(35.0, G - 6.0, 6.0);
    b.fruit_fly(45.0, G - 3.0, 6.0);

    b.floor(50.0, 10.0);
    b.checkpoint(2, 55.0, G);

    // spike tower
    b.rect(60.0, G, 40.0, BOTTOM - G, palette::PIT);
    b.pit(60.0, 40.0);
    b.rect(62.0, G - 2.0, 2.0, 1.0, palette::WOOD);
    b.moving_platform(68.0, G - 5.0, 2.0, 10.0, Axis::Y);
    b.bookshelf(75.0, G - 5.0, 10.0);
    b.spiked_moving_platform(80.0, G - 12.0, 3.0, 6.0, Axis::Y, SpikeSide::Top);
    b.moving_platform(86.0, G - 16.0, 2.0, 8.0, Axis::Y);
    b.spider(75.0, G - 5.0 - 0.7, 2.0);
    b.rect(90.0, G - 14.0, 2.0, 1.0, palette::WOOD);
    b.fruit_fly(90.0, G - 17.0, 8.0);

    b.floor(100.0, 15.0);
    b.checkpoint(3, 105.0, G);

    // crusher
    b.pit(115.0, 30.0);
    b.rect(118.0, G - 2.0, 2.0, 1.0, palette::WOOD);
    b.spiked_moving_platform(124.0, G - 4.0, 3.0, 8.0, Axis::Y, SpikeSide::Bottom);
    b.spiked_moving_platform(134.0, G - 4.0, 3.0, 8.0, Axis::Y, SpikeSide::Top);
    b.moving_platform(140.0, G - 2.0, 2.0, 5.0, Axis::X);

    b.floor(145.0, 15.0);
    b.table(150.0, G, 8.0);
    b.spider(150.0, G - 4.0 - 0.7, 8.0);
    b.spider(155.0, G - 1.0, 8.0);
    b.checkpoint(4, 158.0, G);

    // spike rain
    b.pit(160.0, 40.0);
    b.moving_platform(162.0, G - 3.0, 3.0, 10.0, Axis::X);
    b.moving_platform(175.0, G - 5.0, 3.0, 10.0, Axis::X);
    b.moving_platform(188.0, G - 3.0, 3.0, 10.0, Axis::X);
    for x in (165..195).step_by(2) {
        b.falling_spike(x as f32, G - 15.0);
    }
    b.fruit_fly(170.0, G - 8.0, 20.0);

    b.floor(200.0, 15.0);
    b.sofa(205.0, G, 5.0, palette::SOFA_RED);
    b.checkpoint(5, 210.0, G);

    // final dash
    b.pit(215.0, 60.0);
    b.spiked_moving_platform(220.0, G - 3.0, 3.0, 20.0, Axis::X, SpikeSide::Bottom);
    b.spiked_moving_platform(240.0, G - 7.0, 3.0, 20.0, Axis::X, SpikeSide::Bottom);
    b.rect(230.0, G - 5.0, 2.0, 1.0, palette::WOOD);
    b.spider(230.0, G - 5.0 - 0.6, 2.0);
    b.moving_platform(255.0, G - 4.0, 2.0, 6.0, Axis::Y);
    b.moving_platform(265.0, G - 8.0, 3.0, 8.0, Axis::Y);
    b.fruit_fly(260.0, G - 10.0, 10.0);

    b.floor(275.0, 25.0);
    b.checkpoint(6, 290.0, G);

    LayoutInfo {
        name: "The Omni-Gauntlet",
        // the victory floor runs to tile 300; the wall sits past it
        width_tiles: 300.0,
        time_limit_secs: Some(300),
    }
}
